//! [`PageDriver`] implementation over a CDP page session.

use std::time::Duration;

use async_trait::async_trait;
use jobpilot_engine::{DriverError, Locator, PageDriver};
use serde_json::Value;

use crate::error::CdpError;
use crate::session::PageSession;

impl From<CdpError> for DriverError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::NavigationFailed(msg) => DriverError::Navigation(msg),
            CdpError::ElementNotFound(msg) => DriverError::ElementNotFound(msg),
            CdpError::Timeout(msg) => DriverError::Timeout(msg),
            CdpError::JavaScript(msg) => DriverError::Script(msg),
            CdpError::SessionClosed => DriverError::SessionClosed,
            other => DriverError::Interaction(other.to_string()),
        }
    }
}

/// A live vacancy page backed by CDP.
///
/// CSS locators go through the DOM domain (real mouse clicks at the element
/// center); text locators are resolved in page JavaScript, mirroring the
/// text-matching queries the site's markup requires.
pub struct CdpPage {
    session: PageSession,
}

impl CdpPage {
    pub fn new(session: PageSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &PageSession {
        &self.session
    }
}

/// JS expression selecting elements for a locator, bound to `matches`.
fn locator_prelude(locator: &Locator) -> String {
    match locator {
        Locator::Css(css) => format!(
            "const matches = Array.from(document.querySelectorAll({css}));",
            css = js_str(css)
        ),
        Locator::Text(text) => format!(
            "const needle = {text};\n\
             const matches = Array.from(document.querySelectorAll('*'))\
                 .filter(el => el.childElementCount === 0 && el.textContent.includes(needle));",
            text = js_str(text)
        ),
        Locator::CssWithText { css, text } => format!(
            "const needle = {text};\n\
             const matches = Array.from(document.querySelectorAll({css}))\
                 .filter(el => el.textContent.includes(needle));",
            css = js_str(css),
            text = js_str(text)
        ),
    }
}

fn count_js(locator: &Locator) -> String {
    format!("(() => {{ {} return matches.length; }})()", locator_prelude(locator))
}

fn click_js(locator: &Locator) -> String {
    format!(
        "(() => {{ {} if (matches.length === 0) return false; \
         matches[0].scrollIntoView({{block: 'center'}}); matches[0].click(); return true; }})()",
        locator_prelude(locator)
    )
}

fn text_js(locator: &Locator) -> String {
    format!(
        "(() => {{ {} return matches.length === 0 ? null : matches[0].innerText; }})()",
        locator_prelude(locator)
    )
}

/// Quote a string for safe embedding in a JS expression.
fn js_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

#[async_trait]
impl PageDriver for CdpPage {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        self.session.navigate(url, timeout).await?;
        Ok(())
    }

    async fn probe(&self, locator: &Locator) -> Result<bool, DriverError> {
        match locator {
            Locator::Css(css) => Ok(self.session.count_selector(css).await? > 0),
            _ => {
                let count = self.session.evaluate(&count_js(locator)).await?;
                Ok(count.as_u64().unwrap_or(0) > 0)
            }
        }
    }

    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        let start = std::time::Instant::now();
        loop {
            if self.probe(locator).await? {
                return Ok(());
            }
            if start.elapsed() > timeout {
                return Err(DriverError::Timeout(format!(
                    "Waiting for {} timed out",
                    locator
                )));
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    async fn click(&self, locator: &Locator) -> Result<(), DriverError> {
        match locator {
            Locator::Css(css) => {
                self.session.click_selector(css).await?;
                Ok(())
            }
            _ => {
                let clicked = self.session.evaluate(&click_js(locator)).await?;
                if clicked.as_bool() == Some(true) {
                    Ok(())
                } else {
                    Err(DriverError::ElementNotFound(locator.to_string()))
                }
            }
        }
    }

    async fn fill(&self, locator: &Locator, text: &str) -> Result<(), DriverError> {
        match locator {
            Locator::Css(css) => {
                self.session.fill_selector(css, text).await?;
                Ok(())
            }
            _ => Err(DriverError::Interaction(format!(
                "fill is only supported for CSS locators, got {}",
                locator
            ))),
        }
    }

    async fn text_of(&self, locator: &Locator) -> Result<Option<String>, DriverError> {
        let value = self.session.evaluate(&text_js(locator)).await?;
        Ok(value.as_str().map(|s| s.to_string()))
    }

    async fn evaluate(&self, expression: &str) -> Result<Value, DriverError> {
        Ok(self.session.evaluate(expression).await?)
    }

    async fn title(&self) -> Result<String, DriverError> {
        Ok(self.session.get_title().await?)
    }

    async fn content(&self) -> Result<String, DriverError> {
        Ok(self.session.get_content().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_str_escapes_quotes() {
        assert_eq!(js_str(r#"a"b"#), r#""a\"b""#);
    }

    #[test]
    fn test_count_js_for_text_locator() {
        let js = count_js(&Locator::text("Вы откликнулись"));
        assert!(js.contains("Вы откликнулись"));
        assert!(js.contains("matches.length"));
    }

    #[test]
    fn test_click_js_for_css_with_text() {
        let js = click_js(&Locator::css_with_text("button", "Отправить"));
        assert!(js.contains("querySelectorAll(\"button\")"));
        assert!(js.contains("Отправить"));
        assert!(js.contains(".click()"));
    }

    #[test]
    fn test_cdp_error_mapping() {
        let err: DriverError = CdpError::NavigationFailed("net::ERR".to_string()).into();
        assert!(matches!(err, DriverError::Navigation(_)));

        let err: DriverError = CdpError::SessionClosed.into();
        assert!(matches!(err, DriverError::SessionClosed));

        let err: DriverError = CdpError::Http("500".to_string()).into();
        assert!(matches!(err, DriverError::Interaction(_)));
    }
}
