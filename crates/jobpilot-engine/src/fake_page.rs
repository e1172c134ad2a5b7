//! Scripted in-memory page used by the flow tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::DriverError;
use crate::page::{Locator, PageDriver};

/// What a click does to the scripted page.
pub enum Mutation {
    Add(Locator),
    Remove(Locator),
}

/// A page whose affordances and reactions are scripted per scenario.
///
/// Elements are keyed by the locator's display form. Clicking an element
/// applies its scripted mutations, modelling the page state transitions the
/// real site performs after each interaction.
#[derive(Default)]
pub struct FakePage {
    present: Mutex<HashSet<String>>,
    texts: Mutex<HashMap<String, String>>,
    on_click: Mutex<HashMap<String, Vec<Mutation>>>,
    eval_results: Mutex<Vec<Value>>,
    pub clicks: Mutex<Vec<String>>,
    pub fills: Mutex<Vec<(String, String)>>,
    pub navigations: Mutex<Vec<String>>,
    fail_navigation: Mutex<Option<String>>,
    title: Mutex<String>,
    html: Mutex<String>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, locator: Locator) -> Self {
        self.present.lock().unwrap().insert(locator.to_string());
        self
    }

    pub fn with_text(self, locator: Locator, text: &str) -> Self {
        let key = locator.to_string();
        self.present.lock().unwrap().insert(key.clone());
        self.texts.lock().unwrap().insert(key, text.to_string());
        self
    }

    pub fn on_click(self, locator: Locator, mutations: Vec<Mutation>) -> Self {
        self.on_click
            .lock()
            .unwrap()
            .insert(locator.to_string(), mutations);
        self
    }

    pub fn failing_navigation(self, reason: &str) -> Self {
        *self.fail_navigation.lock().unwrap() = Some(reason.to_string());
        self
    }

    pub fn with_title(self, title: &str) -> Self {
        *self.title.lock().unwrap() = title.to_string();
        self
    }

    pub fn with_html(self, html: &str) -> Self {
        *self.html.lock().unwrap() = html.to_string();
        self
    }

    /// Queue a result for the next `evaluate` call (FIFO).
    pub fn push_eval_result(self, value: Value) -> Self {
        self.eval_results.lock().unwrap().push(value);
        self
    }

    pub fn clicked(&self, locator: &Locator) -> bool {
        self.clicks.lock().unwrap().contains(&locator.to_string())
    }

    pub fn filled(&self, locator: &Locator) -> Option<String> {
        let key = locator.to_string();
        self.fills
            .lock()
            .unwrap()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn goto(&self, url: &str, _timeout: Duration) -> Result<(), DriverError> {
        if let Some(reason) = self.fail_navigation.lock().unwrap().clone() {
            return Err(DriverError::Navigation(reason));
        }
        self.navigations.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn probe(&self, locator: &Locator) -> Result<bool, DriverError> {
        Ok(self.present.lock().unwrap().contains(&locator.to_string()))
    }

    async fn wait_for(&self, locator: &Locator, _timeout: Duration) -> Result<(), DriverError> {
        if self.present.lock().unwrap().contains(&locator.to_string()) {
            Ok(())
        } else {
            Err(DriverError::Timeout(locator.to_string()))
        }
    }

    async fn click(&self, locator: &Locator) -> Result<(), DriverError> {
        let key = locator.to_string();
        if !self.present.lock().unwrap().contains(&key) {
            return Err(DriverError::ElementNotFound(key));
        }
        self.clicks.lock().unwrap().push(key.clone());
        if let Some(mutations) = self.on_click.lock().unwrap().get(&key) {
            let mut present = self.present.lock().unwrap();
            for mutation in mutations {
                match mutation {
                    Mutation::Add(l) => {
                        present.insert(l.to_string());
                    }
                    Mutation::Remove(l) => {
                        present.remove(&l.to_string());
                    }
                }
            }
        }
        Ok(())
    }

    async fn fill(&self, locator: &Locator, text: &str) -> Result<(), DriverError> {
        let key = locator.to_string();
        if !self.present.lock().unwrap().contains(&key) {
            return Err(DriverError::ElementNotFound(key));
        }
        self.fills.lock().unwrap().push((key, text.to_string()));
        Ok(())
    }

    async fn text_of(&self, locator: &Locator) -> Result<Option<String>, DriverError> {
        let key = locator.to_string();
        if !self.present.lock().unwrap().contains(&key) {
            return Ok(None);
        }
        Ok(Some(
            self.texts.lock().unwrap().get(&key).cloned().unwrap_or_default(),
        ))
    }

    async fn evaluate(&self, _expression: &str) -> Result<Value, DriverError> {
        let mut results = self.eval_results.lock().unwrap();
        if results.is_empty() {
            Ok(Value::Null)
        } else {
            Ok(results.remove(0))
        }
    }

    async fn title(&self) -> Result<String, DriverError> {
        Ok(self.title.lock().unwrap().clone())
    }

    async fn content(&self) -> Result<String, DriverError> {
        Ok(self.html.lock().unwrap().clone())
    }
}
