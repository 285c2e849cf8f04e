// src/services/form.rs
use std::{sync::Arc, time::Duration};

use crate::{
    api::ApiClient,
    core::enums::FormType,
    dtos::validation::{FormOptions, ValidationError},
    services::{
        debounce::DebouncedValidator, rules::RuleCache, store::ValidationStore, validator,
    },
};

/// 单个表单实例的校验门面（每个渲染中的表单各持一份独立状态）。
///
/// UI 层编辑字段时调用 `validate_field`：同步校验立刻完成并更新状态，
/// 之后才为同一次编辑武装远程校验定时器——二者对同一次编辑不存在竞争。
/// 不同字段之间完全独立，互不干扰。
pub struct FormValidator {
    form_type: FormType,
    rules: Arc<RuleCache>,
    store: ValidationStore,
    remote: DebouncedValidator,
}

impl FormValidator {
    pub fn new(
        form_type: FormType,
        rules: Arc<RuleCache>,
        api: Arc<ApiClient>,
        quiet_period: Duration,
    ) -> Self {
        let store = ValidationStore::new();
        let remote = DebouncedValidator::new(api, store.clone(), form_type, quiet_period);
        Self {
            form_type,
            rules,
            store,
            remote,
        }
    }

    /// 字段编辑入口：本地规则先行（阻塞、廉价），服务端权威校验随后。
    pub fn validate_field(&self, field_name: &str, value: &str) {
        let errors = validator::validate_field(&self.rules, self.form_type, field_name, value);
        self.store.set_field_errors(field_name, errors);
        self.remote.schedule_validate(field_name, value);
    }

    /// 仅运行同步校验并返回结果，不触碰状态存储、不安排远程校验。
    pub fn validate_field_sync(&self, field_name: &str, value: &str) -> Vec<ValidationError> {
        validator::validate_field(&self.rules, self.form_type, field_name, value)
    }

    // --- 状态读取（转发给存储） ---

    pub fn get_field_errors(&self, field_name: &str) -> Vec<ValidationError> {
        self.store.get_field_errors(field_name)
    }

    pub fn is_field_valid(&self, field_name: &str) -> bool {
        self.store.is_field_valid(field_name)
    }

    pub fn is_field_validating(&self, field_name: &str) -> bool {
        self.store.is_field_validating(field_name)
    }

    pub fn is_valid(&self) -> bool {
        self.store.is_valid()
    }

    pub fn store(&self) -> &ValidationStore {
        &self.store
    }

    /// 下拉选项目录（规则缓存加载失败时为 None，表单退化为自由输入）。
    pub fn options(&self) -> Option<&FormOptions> {
        self.rules.options()
    }

    // --- 显式清除 ---

    pub fn clear_field_errors(&self, field_name: &str) {
        self.store.clear_field_errors(field_name);
    }

    pub fn clear_all_errors(&self) {
        self.store.clear_all();
    }

    /// 表单卸载时调用：取消所有挂起的定时器。
    pub fn teardown(&self) {
        self.remote.cancel_all();
    }
}
