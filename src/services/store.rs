// src/services/store.rs
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::dtos::validation::ValidationError;

/// 聚合的校验状态：每字段错误列表 + 每字段进行中标记 + 派生的整体有效标记。
/// 只由校验过程（同步或远程）和显式清除操作改写，UI 层只读。
#[derive(Debug, Clone)]
pub struct ValidationState {
    pub errors: HashMap<String, Vec<ValidationError>>,
    pub is_validating: HashMap<String, bool>,
    /// 派生不变量：当且仅当所有已存在条目的错误列表都为空时为 true。
    /// 从未校验过的字段没有条目，不参与计算。
    pub is_valid: bool,
}

impl Default for ValidationState {
    fn default() -> Self {
        Self {
            errors: HashMap::new(),
            is_validating: HashMap::new(),
            is_valid: true,
        }
    }
}

/// 校验状态存储的共享句柄。克隆成本极低（内部 Arc），
/// 同步校验、远程校验回调与 UI 读取共用同一份状态。
///
/// 每次变更都是按字段 key 的整体替换，不做跨字段的部分合并：
/// 单字段内不会出现丢失更新，不同字段之间键不相交、无需相互串行。
#[derive(Clone)]
pub struct ValidationStore {
    inner: Arc<Mutex<ValidationState>>,
}

impl ValidationStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ValidationState::default())),
        }
    }

    // --- 读取 ---

    pub fn get_field_errors(&self, field_name: &str) -> Vec<ValidationError> {
        self.inner
            .lock()
            .errors
            .get(field_name)
            .cloned()
            .unwrap_or_default()
    }

    /// 没有条目（从未校验）或条目为空列表都视为有效。
    pub fn is_field_valid(&self, field_name: &str) -> bool {
        self.inner
            .lock()
            .errors
            .get(field_name)
            .is_none_or(|errors| errors.is_empty())
    }

    pub fn is_field_validating(&self, field_name: &str) -> bool {
        self.inner
            .lock()
            .is_validating
            .get(field_name)
            .copied()
            .unwrap_or(false)
    }

    pub fn is_valid(&self) -> bool {
        self.inner.lock().is_valid
    }

    /// 整份状态的一致快照（UI 批量渲染用）。
    pub fn snapshot(&self) -> ValidationState {
        self.inner.lock().clone()
    }

    // --- 变更 ---

    /// 整体替换指定字段的错误列表并重算 is_valid。
    pub fn set_field_errors(&self, field_name: &str, errors: Vec<ValidationError>) {
        let mut state = self.inner.lock();
        state.errors.insert(field_name.to_string(), errors);
        state.is_valid = derive_is_valid(&state.errors);
    }

    pub fn set_validating(&self, field_name: &str, validating: bool) {
        self.inner
            .lock()
            .is_validating
            .insert(field_name.to_string(), validating);
    }

    /// 移除该字段的整个条目（之后该字段视为"从未校验"）并重算 is_valid。
    pub fn clear_field_errors(&self, field_name: &str) {
        let mut state = self.inner.lock();
        state.errors.remove(field_name);
        state.is_valid = derive_is_valid(&state.errors);
    }

    /// 重置为空状态。
    pub fn clear_all(&self) {
        *self.inner.lock() = ValidationState::default();
    }
}

impl Default for ValidationStore {
    fn default() -> Self {
        Self::new()
    }
}

fn derive_is_valid(errors: &HashMap<String, Vec<ValidationError>>) -> bool {
    errors.values().all(|errors| errors.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::enums::ErrorCode;

    fn error(field: &str) -> ValidationError {
        ValidationError {
            field: field.to_string(),
            message: format!("{field}は必須です"),
            code: ErrorCode::Required,
        }
    }

    #[test]
    fn fresh_store_is_valid() {
        let store = ValidationStore::new();
        assert!(store.is_valid());
        assert!(store.is_field_valid("price"));
        assert!(!store.is_field_validating("price"));
        assert!(store.get_field_errors("price").is_empty());
    }

    #[test]
    fn set_field_errors_replaces_not_appends() {
        let store = ValidationStore::new();
        store.set_field_errors("name", vec![error("name"), error("name")]);
        assert_eq!(store.get_field_errors("name").len(), 2);

        store.set_field_errors("name", vec![error("name")]);
        assert_eq!(store.get_field_errors("name").len(), 1);
    }

    #[test]
    fn is_valid_derives_over_present_entries_only() {
        let store = ValidationStore::new();
        store.set_field_errors("name", vec![]);
        assert!(store.is_valid());

        store.set_field_errors("price", vec![error("price")]);
        assert!(!store.is_valid());
        // 未校验过的字段不参与 is_valid 计算
        assert!(store.is_field_valid("brand"));

        store.set_field_errors("price", vec![]);
        assert!(store.is_valid());
    }

    #[test]
    fn clear_field_removes_entry_entirely() {
        let store = ValidationStore::new();
        store.set_field_errors("price", vec![error("price")]);
        assert!(!store.is_valid());

        store.clear_field_errors("price");
        assert!(store.is_valid());
        assert!(store.get_field_errors("price").is_empty());
        assert!(store.snapshot().errors.is_empty());
    }

    #[test]
    fn clear_all_resets_to_empty_state() {
        let store = ValidationStore::new();
        store.set_field_errors("price", vec![error("price")]);
        store.set_validating("price", true);

        store.clear_all();
        let snapshot = store.snapshot();
        assert!(snapshot.errors.is_empty());
        assert!(snapshot.is_validating.is_empty());
        assert!(snapshot.is_valid);
    }

    #[test]
    fn validating_flags_are_per_field() {
        let store = ValidationStore::new();
        store.set_validating("price", true);
        assert!(store.is_field_validating("price"));
        assert!(!store.is_field_validating("name"));

        store.set_validating("price", false);
        assert!(!store.is_field_validating("price"));
    }
}
