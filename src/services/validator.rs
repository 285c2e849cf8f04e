// src/services/validator.rs
use crate::{
    core::enums::{ErrorCode, FormType},
    dtos::validation::ValidationError,
    services::rules::RuleCache,
};

/// 同步校验单个字段。纯函数：相同输入永远得到相同结果，无副作用、零网络延迟。
///
/// 检查按固定顺序执行并在必要处短路：
/// 1. 找不到规则 → 空结果（该字段静默通过）
/// 2. required 且值为空/全空白 → 恰好一个 REQUIRED 错误，不再继续
/// 3. 值为空（非必填）→ 空结果，其余检查只针对非空值
/// 4. 长度下限 / 上限（按字符计数，不是字节数）
/// 5. 正则模式
/// 6. 数值解析与范围（解析失败记 INVALID_FORMAT 并跳过范围检查）
///
/// 一个值可以同时命中多个错误码（有序列表），例如过短且格式不符。
pub fn validate_field(
    cache: &RuleCache,
    form_type: FormType,
    field_name: &str,
    value: &str,
) -> Vec<ValidationError> {
    let Some(rule) = cache.field_rule(form_type, field_name) else {
        return Vec::new();
    };

    let mut errors = Vec::new();

    // 必填检查：命中后不做任何其他检查
    if rule.required && value.trim().is_empty() {
        errors.push(ValidationError {
            field: field_name.to_string(),
            message: required_message(field_name),
            code: ErrorCode::Required,
        });
        return errors;
    }

    // 非必填字段的空值直接通过
    if value.trim().is_empty() {
        return errors;
    }

    let char_count = value.chars().count();

    if let Some(min_length) = rule.min_length {
        if char_count < min_length {
            errors.push(ValidationError {
                field: field_name.to_string(),
                message: format!("{min_length}文字以上で入力してください"),
                code: ErrorCode::MinLength,
            });
        }
    }

    if let Some(max_length) = rule.max_length {
        if char_count > max_length {
            errors.push(ValidationError {
                field: field_name.to_string(),
                message: format!("{max_length}文字以内で入力してください"),
                code: ErrorCode::MaxLength,
            });
        }
    }

    // 模式检查。无法编译的模式在规则加载时已被跳过，这里查不到就不检查
    if rule.pattern.is_some() {
        if let Some(regex) = cache.pattern(form_type, field_name) {
            if !regex.is_match(value) {
                errors.push(ValidationError {
                    field: field_name.to_string(),
                    message: pattern_message(field_name),
                    code: ErrorCode::InvalidFormat,
                });
            }
        }
    }

    // 数值范围检查：严格解析（与后端一致），解析失败时跳过范围比较
    if rule.min_value.is_some() || rule.max_value.is_some() {
        match value.trim().parse::<f64>() {
            Ok(number) => {
                if let Some(min_value) = rule.min_value {
                    if number < min_value {
                        errors.push(ValidationError {
                            field: field_name.to_string(),
                            message: format!("{min_value}以上で入力してください"),
                            code: ErrorCode::MinValue,
                        });
                    }
                }
                if let Some(max_value) = rule.max_value {
                    if number > max_value {
                        errors.push(ValidationError {
                            field: field_name.to_string(),
                            message: format!("{max_value}以下で入力してください"),
                            code: ErrorCode::MaxValue,
                        });
                    }
                }
            }
            Err(_) => {
                errors.push(ValidationError {
                    field: field_name.to_string(),
                    message: "有効な数値を入力してください".to_string(),
                    code: ErrorCode::InvalidFormat,
                });
            }
        }
    }

    errors
}

// --- 文案模板：按字段名本地化，code 不受文案变动影响 ---

fn required_message(field_name: &str) -> String {
    let message = match field_name {
        "name" => "名前は必須です",
        "email" => "メールアドレスは必須です",
        "password" => "パスワードは必須です",
        "brand" => "ブランド名は必須です",
        "category" => "カテゴリは必須です",
        "size" => "サイズは必須です",
        "color" => "色は必須です",
        "price" => "価格は必須です",
        "stock_quantity" => "在庫数は必須です",
        other => return format!("{other}は必須です"),
    };
    message.to_string()
}

fn pattern_message(field_name: &str) -> String {
    let message = match field_name {
        "email" => "有効なメールアドレスを入力してください",
        "password" => "パスワードは大文字、小文字、数字を含む必要があります",
        _ => "正しい形式で入力してください",
    };
    message.to_string()
}
