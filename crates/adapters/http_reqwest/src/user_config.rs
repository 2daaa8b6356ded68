//! [`UserConfigGateway`] over `/api/user-config`.

use reqwest::Method;

use autopanel_app::ports::UserConfigGateway;
use autopanel_domain::error::PanelError;
use autopanel_domain::user_config::UserConfig;

use crate::client::HttpBackend;

const PATH: &[&str] = &["api", "user-config"];

impl UserConfigGateway for HttpBackend {
    async fn load_user_config(&self) -> Result<UserConfig, PanelError> {
        let envelope = self.call(self.request(Method::GET, PATH)).await?;
        Ok(envelope.config.unwrap_or_default())
    }

    async fn save_user_config(&self, config: UserConfig) -> Result<(), PanelError> {
        self.call(self.request(Method::POST, PATH).json(&config))
            .await?;
        Ok(())
    }

    async fn reset_user_config(&self) -> Result<(), PanelError> {
        self.call(self.request(Method::DELETE, PATH)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::HttpConfig;

    fn backend(server: &MockServer) -> HttpBackend {
        HttpBackend::new(&HttpConfig {
            base_url: server.uri(),
            timeout_secs: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn should_load_saved_config() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user-config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "config": {"taskChecked": {"Fight": true}, "taskOptions": {"Stage": "B"}}
            })))
            .mount(&server)
            .await;

        let config = backend(&server).load_user_config().await.unwrap();
        assert!(config.task_checked.unwrap()["Fight"]);
        assert_eq!(config.task_options.unwrap()["Stage"], "B");
        assert!(config.task_order.is_none());
    }

    #[tokio::test]
    async fn should_treat_missing_config_as_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user-config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .mount(&server)
            .await;

        let config = backend(&server).load_user_config().await.unwrap();
        assert!(config.is_empty());
    }

    #[tokio::test]
    async fn should_save_config_in_camel_case() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user-config"))
            .and(body_json(json!({"taskOrder": ["Mail", "Fight"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        let config = UserConfig {
            task_order: Some(vec!["Mail".into(), "Fight".into()]),
            ..UserConfig::default()
        };
        backend(&server).save_user_config(config).await.unwrap();
    }

    #[tokio::test]
    async fn should_reset_config() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/user-config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        backend(&server).reset_user_config().await.unwrap();
    }
}
