// core/tests/common/mod.rs
//
// Shared mock engine for the integration tests. The probe handles let a test
// observe how often and with which context the coordinator reached the
// engine after the engine itself was boxed into a registry.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use typeahead_core::{
    BoxedEngine, EngineError, EngineRegistry, Prediction, PredictionEngine,
};

#[derive(Debug, Clone, Default)]
pub struct Probe {
    pub calls: Rc<Cell<usize>>,
    pub contexts: Rc<RefCell<Vec<String>>>,
    pub configured: Rc<RefCell<Vec<(String, String)>>>,
}

impl Probe {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn contexts(&self) -> Vec<String> {
        self.contexts.borrow().clone()
    }

    pub fn configured(&self, key: &str) -> Option<String> {
        self.configured
            .borrow()
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

/// Returns a fixed word list for every context.
#[derive(Debug)]
pub struct MockEngine {
    words: Vec<String>,
    fail: bool,
    probe: Probe,
}

impl MockEngine {
    pub fn new(words: &[&str], probe: &Probe) -> Self {
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
            fail: false,
            probe: probe.clone(),
        }
    }

    pub fn failing(probe: &Probe) -> Self {
        Self {
            words: Vec::new(),
            fail: true,
            probe: probe.clone(),
        }
    }

    pub fn boxed(self) -> BoxedEngine {
        Box::new(self)
    }
}

impl PredictionEngine for MockEngine {
    fn configure(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        self.probe
            .configured
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn predict(&self, context: &str) -> Result<Vec<Prediction>, EngineError> {
        self.probe.calls.set(self.probe.calls.get() + 1);
        self.probe.contexts.borrow_mut().push(context.to_string());
        if self.fail {
            return Err(EngineError::Resource("model unavailable".to_string()));
        }
        Ok(self
            .words
            .iter()
            .map(|w| Prediction::new(w.as_str(), 0.5))
            .collect())
    }
}

/// Registry with one mock engine for "en".
pub fn english(words: &[&str]) -> (EngineRegistry, Probe) {
    let probe = Probe::default();
    let mut engines = EngineRegistry::new();
    engines.insert("en", MockEngine::new(words, &probe).boxed());
    (engines, probe)
}
