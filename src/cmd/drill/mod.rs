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
    use std::fs::read_to_string;
    use std::time::Duration;

    use reqwest::StatusCode;
    use reqwest::redirect::Policy as RedirectPolicy;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;
    use tokio::time::timeout;

    use crate::cmd::drill::server::ServerConfig;
    use crate::cmd::drill::server::start_server;
    use crate::engine::Engine;
    use crate::error::Fallible;
    use crate::helper::create_tmp_copy_of_test_directory;
    use crate::types::policy::Policy;

    async fn post(port: u16, action: &str) -> Fallible<String> {
        let response = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/"))
            .form(&[("action", action)])
            .send()
            .await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        Ok(response.text().await?)
    }

    #[tokio::test]
    async fn test_empty_category() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let engine = Engine::open(dir.path())?;
        let port = portpicker::pick_unused_port().unwrap();
        let config = ServerConfig {
            category: "empty".to_string(),
            policy: Policy::sequential(),
            port,
            open_browser: false,
        };
        let err = start_server(engine, config).await.err().unwrap();
        assert!(err.is_empty_selection());
        assert!(TcpStream::connect(("127.0.0.1", port)).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let engine = Engine::open(dir.path())?;
        let port = portpicker::pick_unused_port().unwrap();
        let config = ServerConfig {
            category: "math".to_string(),
            policy: Policy::sequential(),
            port,
            open_browser: false,
        };
        let server = spawn(async move { start_server(engine, config).await });
        loop {
            if let Ok(stream) = TcpStream::connect(("127.0.0.1", port)).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        let base = format!("http://127.0.0.1:{port}");

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("{base}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the `script.js` endpoint.
        let response = reqwest::get(format!("{base}/script.js")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );
        let script = response.text().await?;
        assert!(script.contains("const TYPING_SPEED = 200;"));
        assert!(script.contains("const SOUND = false;"));

        // Hit the not found endpoint.
        let response = reqwest::get(format!("{base}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // The first card starts out being typed.
        let response = reqwest::get(format!("{base}/")).await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains(r#"data-text="What is 2 + 2?""#));
        assert!(html.contains(r#"data-animating="true""#));
        assert!(html.contains("Addition_001.txt"));

        // Moving on while typing is ignored without an error.
        let html = post(port, "Next").await?;
        assert!(html.contains(r#"data-text="What is 2 + 2?""#));
        assert!(!html.contains(r#"class="error""#));

        // Typing done.
        let html = post(port, "Typed").await?;
        assert!(html.contains(r#"data-animating="false""#));
        assert!(html.contains("What is 2 + 2?"));

        // Reveal.
        let html = post(port, "Reveal").await?;
        assert!(html.contains(r#"data-text="4""#));
        assert!(html.contains("Answer"));

        // Mark wrong.
        post(port, "Typed").await?;
        let html = post(port, "Wrong").await?;
        assert!(html.contains("last answered wrong"));
        let ledger = read_to_string(dir.path().join("flashcard_results.json"))?;
        assert!(ledger.contains(r#""math/Addition_001.txt": false"#));

        // Next card.
        let html = post(port, "Next").await?;
        assert!(html.contains(r#"data-text="What is 6 x 7?""#));
        assert!(html.contains("not answered yet"));

        // End the session without following the redirect.
        let response = reqwest::Client::builder()
            .redirect(RedirectPolicy::none())
            .build()?
            .post(format!("{base}/"))
            .form(&[("action", "End")])
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        drop(response);
        let result = timeout(Duration::from_secs(5), server).await;
        assert!(matches!(result, Ok(Ok(Ok(())))));
        Ok(())
    }
}
