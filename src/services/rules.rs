// src/services/rules.rs
use std::collections::HashMap;

use regex::Regex;

use crate::{
    api::ApiClient,
    core::enums::FormType,
    dtos::validation::{FieldRule, FormOptions, FormValidationRules},
};

/// 校验规则缓存：每个应用会话从后端一次性拉取校验规则与表单选项。
/// 加载完成后只读，经 Arc 被所有并发校验安全共享，无需加锁。
pub struct RuleCache {
    rules: Option<FormValidationRules>,
    options: Option<FormOptions>,
    /// (表单类型, 字段名) -> 预编译正则。无法编译的模式在加载时被跳过，
    /// 对应字段的格式检查退化为仅由远程校验兜底。
    patterns: HashMap<(FormType, String), Regex>,
    loading: bool,
}

impl RuleCache {
    /// 尚未加载的空缓存（loading = true）。此状态下所有字段都按无规则处理。
    pub fn empty() -> Self {
        Self {
            rules: None,
            options: None,
            patterns: HashMap::new(),
            loading: true,
        }
    }

    /// 并行拉取规则与选项。任一失败只记录日志并让对应槽位保持为空
    /// （相应字段退化为无本地约束），不重试；加载结束后 loading 一定为 false。
    pub async fn load(api: &ApiClient) -> Self {
        let (rules_result, options_result) =
            tokio::join!(api.get_validation_rules(), api.get_form_options());

        let rules = match rules_result {
            Ok(rules) => Some(rules),
            Err(e) => {
                tracing::error!("❌ Failed to fetch validation rules: {}", e);
                None
            }
        };

        let options = match options_result {
            Ok(options) => Some(options),
            Err(e) => {
                tracing::error!("❌ Failed to fetch form options: {}", e);
                None
            }
        };

        let patterns = rules.as_ref().map(compile_patterns).unwrap_or_default();

        Self {
            rules,
            options,
            patterns,
            loading: false,
        }
    }

    /// 直接从给定规则构建缓存（测试与离线场景）。
    pub fn from_rules(rules: FormValidationRules) -> Self {
        let patterns = compile_patterns(&rules);
        Self {
            rules: Some(rules),
            options: None,
            patterns,
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn rules(&self) -> Option<&FormValidationRules> {
        self.rules.as_ref()
    }

    pub fn options(&self) -> Option<&FormOptions> {
        self.options.as_ref()
    }

    /// 查找 (form_type, field_name) 的规则。
    /// 缺失时返回 None，该字段的本地校验静默通过。
    pub fn field_rule(&self, form_type: FormType, field_name: &str) -> Option<&FieldRule> {
        self.rules.as_ref()?.rule_set(form_type).get(field_name)
    }

    /// 该字段的预编译正则（若模式存在且可编译）。
    pub fn pattern(&self, form_type: FormType, field_name: &str) -> Option<&Regex> {
        self.patterns.get(&(form_type, field_name.to_string()))
    }
}

fn compile_patterns(rules: &FormValidationRules) -> HashMap<(FormType, String), Regex> {
    let mut compiled = HashMap::new();

    for form_type in [FormType::Clothes, FormType::Coordinates, FormType::Auth] {
        for (field_name, rule) in rules.rule_set(form_type) {
            let Some(pattern) = &rule.pattern else {
                continue;
            };
            match Regex::new(pattern) {
                Ok(regex) => {
                    compiled.insert((form_type, field_name.clone()), regex);
                }
                Err(e) => {
                    // 后端规则可能使用本引擎不支持的语法（如先行断言），
                    // 跳过后该字段的格式检查由远程校验兜底
                    tracing::warn!(
                        "⚠️ Unsupported pattern for {}.{}, format check degrades to remote: {}",
                        form_type,
                        field_name,
                        e
                    );
                }
            }
        }
    }

    compiled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_with_pattern(pattern: &str) -> FormValidationRules {
        let mut auth = HashMap::new();
        auth.insert(
            "email".to_string(),
            FieldRule {
                required: true,
                pattern: Some(pattern.to_string()),
                ..Default::default()
            },
        );
        FormValidationRules {
            auth,
            ..Default::default()
        }
    }

    #[test]
    fn compilable_patterns_are_cached_at_load() {
        let cache = RuleCache::from_rules(rules_with_pattern(r"^[^@]+@[^@]+\.[^@]+$"));
        assert!(cache.pattern(FormType::Auth, "email").is_some());
        assert!(cache.pattern(FormType::Auth, "password").is_none());
    }

    #[test]
    fn uncompilable_patterns_are_skipped() {
        // 先行断言：regex crate 不支持，加载时跳过而不是失败
        let cache = RuleCache::from_rules(rules_with_pattern(r"^(?=.*[a-z]).+$"));
        assert!(cache.pattern(FormType::Auth, "email").is_none());
        // 规则本身仍然在，required 等其他约束不受影响
        assert!(cache.field_rule(FormType::Auth, "email").is_some());
    }

    #[test]
    fn missing_rule_set_yields_no_rules() {
        let cache = RuleCache::empty();
        assert!(cache.field_rule(FormType::Clothes, "price").is_none());
        assert!(cache.rules().is_none());
        assert!(cache.options().is_none());
    }
}
