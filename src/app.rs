//! The smoke test itself: resolve the key, configure a client, send the
//! prompt, print the answer.

use crate::{
    config::GeminiConfig,
    error::{Error, Result},
    generator::TextGenerator,
};
use std::io::Write;
use tracing::debug;

/// Prompt sent on every run
pub const PROMPT: &str = "Hello";

/// Run the smoke test once.
///
/// `lookup` reads configuration variables, `connect` turns the resolved
/// configuration into a generator, and `out` receives either the
/// missing-credential diagnostic or the generated text, never both. A
/// missing key returns before `connect` is called, so no request is made.
pub async fn run<F, C, G, W>(lookup: F, connect: C, out: &mut W) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
    C: FnOnce(GeminiConfig) -> Result<G>,
    G: TextGenerator,
    W: Write,
{
    let config = match GeminiConfig::from_lookup(lookup) {
        Err(err @ Error::MissingCredential { .. }) => {
            writeln!(out, "Error: {err}")?;
            out.flush()?;
            return Err(err);
        }
        other => other?,
    };

    let model = config.model_config.model.clone();
    let generator = connect(config)?;

    debug!("Sending prompt to {}", model);
    let text = generator.generate_text(&model, PROMPT).await?;

    writeln!(out, "{text}")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::API_KEY_VAR;
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};
    use std::sync::Mutex;

    /// Generator double with a scripted reply that records what it was asked
    struct ScriptedGenerator {
        reply: std::result::Result<String, u16>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedGenerator {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl<'a> TextGenerator for &'a ScriptedGenerator {
        async fn generate_text(&self, model: &str, prompt: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((model.to_string(), prompt.to_string()));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(Error::Api {
                    status: *status,
                    message: "scripted failure".to_string(),
                    details: None,
                }),
            }
        }
    }

    fn with_key(key: &'static str) -> impl Fn(&str) -> Option<String> {
        move |name| (name == API_KEY_VAR).then(|| key.to_string())
    }

    fn without_key(_: &str) -> Option<String> {
        None
    }

    #[tokio::test]
    async fn test_missing_key_prints_diagnostic_and_never_connects() {
        let connected = Cell::new(false);
        let generator = ScriptedGenerator::replying("unused");
        let mut out = Vec::new();

        let err = run(
            without_key,
            |_| {
                connected.set(true);
                Ok(&generator)
            },
            &mut out,
        )
        .await
        .unwrap_err();

        assert!(err.is_missing_credential());
        assert!(!connected.get());
        assert!(generator.calls.lock().unwrap().is_empty());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: GOOGLE_GENERATIVE_AI_API_KEY not found in .env.local\n"
        );
    }

    #[tokio::test]
    async fn test_empty_key_counts_as_missing() {
        let generator = ScriptedGenerator::replying("unused");
        let mut out = Vec::new();

        let err = run(with_key(""), |_| Ok(&generator), &mut out)
            .await
            .unwrap_err();

        assert!(err.is_missing_credential());
        assert!(generator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_key_is_passed_verbatim_to_client_configuration() {
        let seen_key = RefCell::new(None);
        let generator = ScriptedGenerator::replying("ok");
        let mut out = Vec::new();

        run(
            with_key("abc123"),
            |config: GeminiConfig| {
                *seen_key.borrow_mut() = Some(config.api_key.clone());
                Ok(&generator)
            },
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(seen_key.into_inner().as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_prints_generated_text_exactly() {
        let generator = ScriptedGenerator::replying("Hello, world!");
        let mut out = Vec::new();

        run(with_key("abc123"), |_| Ok(&generator), &mut out)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Hello, world!\n");
        assert_eq!(
            *generator.calls.lock().unwrap(),
            vec![("gemini-flash-latest".to_string(), "Hello".to_string())]
        );
    }

    #[tokio::test]
    async fn test_generation_failure_prints_nothing() {
        let generator = ScriptedGenerator::failing(500);
        let mut out = Vec::new();

        let err = run(with_key("abc123"), |_| Ok(&generator), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api { status: 500, .. }));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_connect_failure_propagates() {
        let mut out = Vec::new();

        let err = run(
            with_key("abc123"),
            |_| Err::<&ScriptedGenerator, _>(Error::Config("no transport".to_string())),
            &mut out,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_ignores_environment_contents() {
        let generator = ScriptedGenerator::replying("hi");
        let lookup = |name: &str| match name {
            API_KEY_VAR => Some("abc123".to_string()),
            _ => Some("something else entirely".to_string()),
        };
        let mut out = Vec::new();

        run(lookup, |_| Ok(&generator), &mut out).await.unwrap();

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "Hello");
    }

    #[tokio::test]
    async fn test_reruns_produce_identical_output() {
        let mut outputs = Vec::new();
        for _ in 0..2 {
            let generator = ScriptedGenerator::replying("Hello, world!");
            let mut out = Vec::new();
            run(with_key("abc123"), |_| Ok(&generator), &mut out)
                .await
                .unwrap();
            outputs.push(out);
        }
        assert_eq!(outputs[0], outputs[1]);
    }
}
