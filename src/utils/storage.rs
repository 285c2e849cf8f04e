// src/utils/storage.rs
use std::{
    fs,
    io::Write,
    path::PathBuf,
};

use crate::dtos::auth::PersistedSession;

/// 会话持久化存储：单个 JSON 文件承载三项字符串条目
/// （auth_token / user_pid / user_name）。
///
/// 写入路径是"临时文件 + rename"：三项条目要么整体可见、要么整体不可见，
/// 读取方不可能观察到部分写入的中间态。读写失败不阻断业务（Soft Fail 策略），
/// 只记录日志并按"无会话"处理。
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 读取持久化会话。文件缺失、内容损坏都按"无会话"处理。
    pub fn load(&self) -> Option<PersistedSession> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("⚠️ Session storage read failed: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("⚠️ Session storage corrupted, ignoring: {}", e);
                None
            }
        }
    }

    /// 整组写入会话条目（登录/注册成功时调用）。
    pub fn save(&self, session: &PersistedSession) {
        match self.try_save(session) {
            Ok(()) => tracing::debug!("💾 Session persisted"),
            Err(e) => tracing::warn!("⚠️ Session storage write failed: {}", e),
        }
    }

    fn try_save(&self, session: &PersistedSession) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(session).map_err(std::io::Error::other)?;

        // 先落临时文件再原子替换，rename 之前旧内容保持完整可读
        let tmp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// 整组清除（登出或令牌失效时调用）。文件不存在视为已清除。
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("🗑️ Session cleared"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("⚠️ Session storage clear failed: {}", e),
        }
    }

    /// 当前持久化令牌（若有）。认证请求据此附加 Bearer 头。
    pub fn token(&self) -> Option<String> {
        self.load().map(|session| session.auth_token)
    }
}
