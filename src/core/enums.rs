// src/core/enums.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// 表单类型枚举：校验规则的命名空间。
/// 同时支持：
/// 1. JSON 序列化 (Serde) - 与后端交互时输出小写字符串
/// 2. 字符串转换 (Strum) - 日志与代码逻辑判断
///
/// 规则组的选取通过对本枚举的穷举 match 完成，
/// 不存在按字符串索引规则对象而 key 缺失的运行时失败。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")] // to_string() 输出小写
#[serde(rename_all = "lowercase")]    // JSON 输出小写
pub enum FormType {
    Clothes,
    Coordinates,
    Auth,
}

/// 校验错误码。稳定的机器可读标识，与本地化文案相互独立：
/// 测试与调用方都应断言错误码而非消息文本。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Required,
    MinLength,
    MaxLength,
    InvalidFormat,
    MinValue,
    MaxValue,
}
