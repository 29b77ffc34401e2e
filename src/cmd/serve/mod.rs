// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use portpicker::pick_unused_port;
    use quizapp_core::error::ErrorReport;
    use quizapp_core::error::Fallible;
    use reqwest::StatusCode;
    use tokio::spawn;

    use crate::cmd::serve::server::ServerConfig;
    use crate::cmd::serve::server::start_server;
    use crate::helper::create_tmp_bank;
    use crate::helper::create_tmp_directory;
    use crate::utils::wait_for_server;

    const TEST_HOST: &str = "127.0.0.1";

    struct Page {
        status: StatusCode,
        content_type: String,
        body: String,
    }

    fn http_error(e: reqwest::Error) -> ErrorReport {
        ErrorReport::new(format!("HTTP error: {e}"))
    }

    async fn into_page(response: reqwest::Response) -> Fallible<Page> {
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await.map_err(http_error)?;
        Ok(Page {
            status,
            content_type,
            body,
        })
    }

    async fn get(port: u16, path: &str) -> Fallible<Page> {
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}{path}"))
            .await
            .map_err(http_error)?;
        into_page(response).await
    }

    async fn post(port: u16, form: &[(&str, &str)]) -> Fallible<Page> {
        let response = reqwest::Client::new()
            .post(format!("http://{TEST_HOST}:{port}/"))
            .form(form)
            .send()
            .await
            .map_err(http_error)?;
        into_page(response).await
    }

    /// Post an action and return the page it redirects to.
    async fn act(port: u16, form: &[(&str, &str)]) -> Fallible<String> {
        let page = post(port, form).await?;
        assert!(page.status.is_success());
        Ok(page.body)
    }

    fn config(bank: Option<String>, db: String, port: u16) -> ServerConfig {
        ServerConfig {
            bank,
            host: TEST_HOST.to_string(),
            port,
            db,
            seconds_per_question: 50,
        }
    }

    /// Start a server over the two-question test bank.
    async fn serve(db: &str) -> Fallible<u16> {
        let port = pick_unused_port().unwrap();
        let bank = create_tmp_bank()?.display().to_string();
        let config = config(Some(bank), db.to_string(), port);
        spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await?;
        Ok(port)
    }

    fn tmp_db() -> Fallible<String> {
        Ok(create_tmp_directory()?
            .join("quizapp.db")
            .display()
            .to_string())
    }

    const START: [(&str, &str); 3] = [
        ("action", "Start"),
        ("name", "Ada"),
        ("email", "ada@example.com"),
    ];

    #[tokio::test]
    async fn test_start_server_on_non_existent_bank() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let config = config(Some("./derpherp".to_string()), tmp_db()?, port);
        let result = start_server(config).await;
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: bank path does not exist.");
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let port = serve(&tmp_db()?).await?;

        // Hit the `style.css` endpoint.
        let page = get(port, "/style.css").await?;
        assert!(page.status.is_success());
        assert_eq!(page.content_type, "text/css");

        // Hit the `script.js` endpoint.
        let page = get(port, "/script.js").await?;
        assert!(page.status.is_success());
        assert_eq!(page.content_type, "text/javascript");

        // Hit the not found endpoint.
        let page = get(port, "/herp-derp").await?;
        assert_eq!(page.status, StatusCode::NOT_FOUND);

        // Hit the root endpoint.
        let page = get(port, "/").await?;
        assert!(page.status.is_success());
        assert_eq!(page.content_type, "text/html; charset=utf-8");
        assert!(page.body.contains("2 questions"));
        assert!(!page.body.contains("You have a quiz in progress."));

        // Starting without a name is rejected.
        let html = act(port, &[("action", "Start"), ("email", "ada@example.com")]).await?;
        assert!(html.contains("Please enter both name and email."));

        let html = act(port, &START).await?;
        assert!(html.contains("Question 1 of 2"));

        // Next without an answer is rejected.
        let html = act(port, &[("action", "Next")]).await?;
        assert!(html.contains("Please select an answer."));
        assert!(html.contains("Question 1 of 2"));

        let html = act(port, &[("action", "Next"), ("answer", "0")]).await?;
        assert!(html.contains("Question 2 of 2"));

        // Go back: the earlier answer is pre-selected.
        let html = act(port, &[("action", "Previous")]).await?;
        assert!(html.contains("Question 1 of 2"));
        assert!(html.contains("value=\"0\" checked"));

        // Peek at the report mid-quiz and come back.
        let html = act(port, &[("action", "Report")]).await?;
        assert!(html.contains("Quiz Report"));
        let html = act(port, &[("action", "CloseReport")]).await?;
        assert!(html.contains("Question 1 of 2"));

        // Finish.
        act(port, &[("action", "Next"), ("answer", "0")]).await?;
        let html = act(port, &[("action", "Next"), ("answer", "0")]).await?;
        assert!(html.contains("Quiz Completed"));

        let html = act(port, &[("action", "Report")]).await?;
        assert!(html.contains("Quiz Report"));
        assert!(html.contains("<strong>2 + 2</strong>"));

        let html = act(port, &[("action", "Home")]).await?;
        assert!(html.contains("value=\"Start\""));
        assert!(!html.contains("You have a quiz in progress."));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_action() -> Fallible<()> {
        let port = serve(&tmp_db()?).await?;
        let page = post(port, &[("action", "Derp")]).await?;
        assert!(page.status.is_client_error());
        Ok(())
    }

    #[tokio::test]
    async fn test_resume_after_restart() -> Fallible<()> {
        let db = tmp_db()?;

        let port = serve(&db).await?;
        act(port, &START).await?;
        act(port, &[("action", "Next"), ("answer", "1")]).await?;
        let html = act(port, &[("action", "Exit")]).await?;
        assert!(html.contains("Quiz Exited"));
        assert!(html.contains("Score: "));

        // A second server over the same database sees the saved attempt.
        let port = serve(&db).await?;
        let page = get(port, "/").await?;
        assert!(page.body.contains("You have a quiz in progress."));
        let html = act(port, &[("action", "Resume")]).await?;
        assert!(html.contains("Question 2 of 2"));

        // Going home discards it.
        let html = act(port, &[("action", "Home")]).await?;
        assert!(!html.contains("You have a quiz in progress."));

        Ok(())
    }

    #[tokio::test]
    async fn test_discard_saved_progress() -> Fallible<()> {
        let db = tmp_db()?;
        let port = serve(&db).await?;
        act(port, &START).await?;
        act(port, &[("action", "Exit")]).await?;

        let port = serve(&db).await?;
        let html = act(port, &[("action", "Discard")]).await?;
        assert!(!html.contains("You have a quiz in progress."));
        let html = act(port, &[("action", "Resume")]).await?;
        assert!(html.contains("There is no saved progress to resume."));
        Ok(())
    }
}
