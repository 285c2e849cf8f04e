// src/services/debounce.rs
use std::{collections::HashMap, sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::{
    api::ApiClient,
    core::enums::FormType,
    dtos::validation::ValidateFieldRequest,
    services::store::ValidationStore,
};

/// 按字段防抖的远程校验调度器。
///
/// 每个字段最多持有一个未触发的定时器：新的编辑总是取消并替换同字段的
/// 未触发定时器（快速连续编辑被合并为静默期后的一次请求）。已经发出的
/// 网络请求不会被中止——若新旧两个请求都返回，后观察到的响应覆盖先到的
/// （按字段 last-write-wins，不做序号仲裁）。
pub struct DebouncedValidator {
    api: Arc<ApiClient>,
    store: ValidationStore,
    form_type: FormType,
    quiet_period: Duration,
    timers: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl DebouncedValidator {
    pub fn new(
        api: Arc<ApiClient>,
        store: ValidationStore,
        form_type: FormType,
        quiet_period: Duration,
    ) -> Self {
        Self {
            api,
            store,
            form_type,
            quiet_period,
            timers: Mutex::new(HashMap::new()),
        }
    }

    /// 为某字段安排一次远程校验。进行中标记立即置位（UI 可即时反馈），
    /// 请求本身要等静默期结束才发出。
    pub fn schedule_validate(&self, field_name: &str, value: &str) {
        self.store.set_validating(field_name, true);

        let api = Arc::clone(&self.api);
        let store = self.store.clone();
        let form_type = self.form_type;
        let quiet_period = self.quiet_period;
        let field = field_name.to_string();
        let value = value.to_string();

        // 取消并替换同字段挂起的定时器，然后武装新的
        let mut timers = self.timers.lock();
        if let Some(previous) = timers.remove(field_name) {
            previous.abort();
        }

        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;

            // 定时器触发后请求转入独立任务：此后同字段的 cancel-replace
            // 只能取消尚未触发的定时器，追不上已经在途的请求
            tokio::spawn(async move {
                let request = ValidateFieldRequest {
                    field_name: field.clone(),
                    value,
                    form_type,
                };

                match api.validate_field(&request).await {
                    Ok(response) => {
                        // 服务端错误列表整体替换该字段现有列表
                        store.set_field_errors(&field, response.errors);
                        store.set_validating(&field, false);
                    }
                    Err(e) => {
                        // 网络失败不产生用户可见的错误：保留原有错误列表，只清进行中标记
                        tracing::warn!("⚠️ Remote validation failed for field {}: {}", field, e);
                        store.set_validating(&field, false);
                    }
                }
            });
        });

        timers.insert(field_name.to_string(), handle);
    }

    /// 取消全部挂起的定时器。销毁前必须调用（Drop 会兜底），
    /// 防止组件销毁后状态继续被更新。
    pub fn cancel_all(&self) {
        let mut timers = self.timers.lock();
        for (_, handle) in timers.drain() {
            handle.abort();
        }
    }
}

impl Drop for DebouncedValidator {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
