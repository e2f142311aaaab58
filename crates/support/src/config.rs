use serde::Deserialize;

/// Support desk tunables; every field has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SupportConfig {
    /// Recipient of every outbound support message.
    pub mailbox: String,
    pub subject_prefix: String,
    /// Simulated network latency of a send.
    pub send_delay_ms: u32,
    /// BCP 47 tag used to format the response timestamp.
    pub locale: String,
    /// Shown in a blocking alert when a send fails.
    pub failure_alert: String,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            mailbox: "support@maeeex98.fake".to_string(),
            subject_prefix: "[Поддержка]".to_string(),
            send_delay_ms: 2000,
            locale: "ru-RU".to_string(),
            failure_alert: "Ошибка при отправке сообщения. Попробуйте еще раз.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SupportConfig;

    #[test]
    fn overrides_merge_with_defaults() {
        let cfg: SupportConfig =
            serde_json::from_str(r#"{ "send_delay_ms": 10, "locale": "en-GB" }"#).unwrap();
        assert_eq!(cfg.send_delay_ms, 10);
        assert_eq!(cfg.locale, "en-GB");
        assert_eq!(cfg.mailbox, "support@maeeex98.fake");
    }

    #[test]
    fn defaults_share_one_language() {
        let cfg = SupportConfig::default();
        assert_eq!(cfg.locale, "ru-RU");
        assert_eq!(cfg.subject_prefix, "[Поддержка]");
        assert!(cfg.failure_alert.starts_with("Ошибка"));
    }
}
