// src/dtos/catalog.rs
use serde::{Deserialize, Serialize};

/// 衣物条目。时间戳保持后端下发的字符串形态，客户端不做时间运算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothesItem {
    pub pid: String,
    pub name: String,
    pub description: Option<String>,
    pub brand: String,
    pub category: String,
    pub size: String,
    pub color: String,
    pub material: Option<String>,
    pub price: f64,
    pub in_stock: bool,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClothesRequest {
    pub name: String,
    pub description: Option<String>,
    pub brand: String,
    pub category: String,
    pub size: String,
    pub color: String,
    pub material: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
}

/// 部分更新：未设置的字段不进入请求体。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClothesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// 穿搭（コーディネート）条目。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub pid: String,
    pub name: String,
    pub description: Option<String>,
    pub season: Option<String>,
    pub occasion: Option<String>,
    pub style: Option<String>,
    pub user_id: i32,
    pub is_favorite: bool,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCoordinateRequest {
    pub name: String,
    pub description: Option<String>,
    pub season: Option<String>,
    pub occasion: Option<String>,
    pub style: Option<String>,
    pub is_favorite: bool,
    pub image_url: Option<String>,
    /// 该穿搭关联的衣物 pid 列表。
    pub clothes_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCoordinateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// 表单提交接口的响应封装。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSubmitResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}
