// src/dtos/validation.rs
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::enums::{ErrorCode, FormType};

/// 单个字段的校验规则。由后端 `/api/validation/rules` 一次性下发，加载后不可变。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// 正则模式字符串。能否编译由规则缓存在加载时决定，无法编译的模式会被跳过。
    pub pattern: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

/// 字段名 -> 规则。UI 渲染的每个字段都应在这里有对应条目，
/// 缺失条目的字段本地校验静默通过（no-op）。
pub type FieldRuleSet = HashMap<String, FieldRule>;

/// 三类表单的规则全集。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormValidationRules {
    pub clothes: FieldRuleSet,
    pub coordinates: FieldRuleSet,
    pub auth: FieldRuleSet,
}

impl FormValidationRules {
    /// 按表单类型选择规则组。穷举匹配：新增表单类型时编译器会强制补齐这里。
    pub fn rule_set(&self, form_type: FormType) -> &FieldRuleSet {
        match form_type {
            FormType::Clothes => &self.clothes,
            FormType::Coordinates => &self.coordinates,
            FormType::Auth => &self.auth,
        }
    }
}

/// 一条校验错误。code 是稳定标识，message 是按字段名模板化的本地化文案。
/// 每次校验产出的列表整体替换该字段之前的列表，而不是追加。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: ErrorCode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// 表单下拉选项目录（分类/尺码/季节/场合/风格），与校验规则一起拉取。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormOptions {
    pub categories: Vec<SelectOption>,
    pub sizes: Vec<SelectOption>,
    pub seasons: Vec<SelectOption>,
    pub occasions: Vec<SelectOption>,
    pub styles: Vec<SelectOption>,
}

/// 远程字段校验请求体。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateFieldRequest {
    pub field_name: String,
    pub value: String,
    pub form_type: FormType,
}

/// 远程字段校验响应体。errors 为空时 valid 为 true。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateFieldResponse {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}
