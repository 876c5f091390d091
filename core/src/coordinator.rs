//! Session coordinator: debouncing, the prediction pipeline and response
//! emission.
//!
//! `submit()` only records the request. The work happens in `run_pending()`,
//! which plays the role of the zero-delay yield: by the time it runs, every
//! request that was superseded by a newer one for the same session has left
//! the queue, so the queue holds at most one request per session.
//!
//! ## Usage
//!
//! ```rust
//! use typeahead_core::{Coordinator, EngineRegistry, PredictionRequest, SessionKey};
//!
//! let mut coordinator = Coordinator::new(EngineRegistry::new());
//! let tab = SessionKey::new(1, 0);
//!
//! coordinator.submit(PredictionRequest::new("hello w", None, "en", tab));
//! coordinator.submit(PredictionRequest::new("hello wo", None, "en", tab));
//!
//! // Only the second request is answered.
//! let deliveries = coordinator.run_pending();
//! assert_eq!(deliveries.len(), 1);
//! ```

use std::collections::VecDeque;

use tracing::{debug, info, trace, warn};

use crate::cache::PredictionCache;
use crate::capitalization::Capitalization;
use crate::config::Config;
use crate::context::{Delivery, PredictionRequest, PredictionResponse, SessionKey};
use crate::engine::{EngineRegistry, PredictionEngine, ABBREVIATIONS_KEY, SUGGESTIONS_KEY};
use crate::gate::should_predict;
use crate::language::Languages;
use crate::normalizer::normalize;
use crate::postprocess::postprocess;
use crate::session::{Generation, SessionRegistry};
use crate::spacing;

/// A request waiting for its deferred slot.
#[derive(Debug)]
struct DeferredTask {
    generation: Generation,
    request: PredictionRequest,
}

/// Owns the configuration, the engines, the per-language cache and the
/// per-session pending tasks. Independent coordinators share nothing.
#[derive(Debug)]
pub struct Coordinator {
    config: Config,
    engines: EngineRegistry,
    languages: Languages,
    cache: PredictionCache,
    sessions: SessionRegistry,
    queue: VecDeque<DeferredTask>,
}

impl Coordinator {
    /// Create a coordinator with the default configuration.
    pub fn new(engines: EngineRegistry) -> Self {
        Self::with_config(engines, Config::default())
    }

    /// Create a coordinator and push `config` to its engines.
    pub fn with_config(engines: EngineRegistry, config: Config) -> Self {
        let mut coordinator = Self {
            config: Config::default(),
            engines,
            languages: Languages::new(),
            cache: PredictionCache::new(),
            sessions: SessionRegistry::new(),
            queue: VecDeque::new(),
        };
        coordinator.set_config(config);
        coordinator
    }

    /// Use per-language input policies (extra separators).
    pub fn with_languages(mut self, languages: Languages) -> Self {
        self.languages = languages;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the live configuration wholesale and forward the engine
    /// options (suggestion count, text expansions) to every engine.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;

        let suggestions = self.config.num_suggestions.to_string();
        self.engines.configure_all(SUGGESTIONS_KEY, &suggestions);
        self.engines
            .configure_all(ABBREVIATIONS_KEY, &self.config.expansion_table());

        info!(
            num_suggestions = self.config.num_suggestions,
            min_word_length = self.config.min_word_length_to_predict,
            expansions = self.config.text_expansions.len(),
            "configuration updated"
        );
    }

    pub fn engines(&self) -> &EngineRegistry {
        &self.engines
    }

    pub fn languages(&self) -> &Languages {
        &self.languages
    }

    pub fn cache(&self) -> &PredictionCache {
        &self.cache
    }

    /// Get cache statistics for monitoring.
    ///
    /// Returns (hits, misses) tuple.
    pub fn cache_stats(&self) -> (usize, usize) {
        self.cache.stats()
    }

    /// Get cache hit rate as a percentage (0.0 to 100.0).
    pub fn cache_hit_rate(&self) -> Option<f32> {
        self.cache.hit_rate()
    }

    /// Queue a request for its session. A request still pending for the same
    /// session is superseded and leaves the queue.
    pub fn submit(&mut self, request: PredictionRequest) -> Generation {
        let (generation, superseded) = self.sessions.schedule(request.session);
        if let Some(old) = superseded {
            self.queue.retain(|task| task.generation != old);
            trace!(
                tab_id = request.session.tab_id,
                frame_id = request.session.frame_id,
                old,
                "pending prediction superseded"
            );
        }
        self.queue.push_back(DeferredTask {
            generation,
            request,
        });
        generation
    }

    /// Drop the pending request of `session`, e.g. when its surface goes
    /// away. Returns whether something was pending.
    pub fn cancel(&mut self, session: &SessionKey) -> bool {
        match self.sessions.cancel(session) {
            Some(generation) => {
                self.queue.retain(|task| task.generation != generation);
                true
            }
            None => false,
        }
    }

    /// Number of sessions with a request waiting to run.
    pub fn pending_count(&self) -> usize {
        self.sessions.len()
    }

    /// Number of requests waiting in the run queue. At most one per session.
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Run every queued request that is still current, in arrival order.
    /// Superseded and cancelled requests produce nothing.
    pub fn run_pending(&mut self) -> Vec<Delivery> {
        let mut deliveries = Vec::new();

        while let Some(task) = self.queue.pop_front() {
            let session = task.request.session;
            if !self.sessions.is_current(&session, task.generation) {
                trace!(generation = task.generation, "dropping stale prediction request");
                continue;
            }

            let response = self.run_prediction(&task.request);
            self.sessions.complete(&session, task.generation);
            deliveries.push(Delivery { session, response });
        }

        deliveries
    }

    /// The synchronous pipeline for one request.
    ///
    /// 1. spacing rules may force a replacement instead of a prediction;
    /// 2. no engine for the language, or a closed gate, gives no predictions;
    /// 3. an unchanged context reuses the cached predictions;
    /// 4. otherwise the engine is asked and the cache refreshed;
    /// 5. the list is spaced and capitalized.
    pub fn run_prediction(&self, request: &PredictionRequest) -> PredictionResponse {
        let trigger_input_event = self.config.insert_space_after_autocomplete;
        let text = request.text.as_deref();
        let input = normalize(text, self.languages.separators_for(&request.lang));

        if self.config.apply_spacing_rules {
            if let Some(fix) =
                text.and_then(|t| spacing::force_replace(t, self.config.insert_space_after_autocomplete))
            {
                debug!(replacement = %fix.text, length = fix.length, "forcing punctuation spacing");
                return PredictionResponse {
                    predictions: Vec::new(),
                    force_replace: Some(fix),
                    trigger_input_event,
                };
            }
        }

        let Some(engine) = self.engines.get(&request.lang) else {
            debug!(lang = %request.lang, "no prediction engine for language");
            return PredictionResponse::empty(trigger_input_event);
        };

        if !input.valid || !should_predict(&input.active_last_word, input.ends_with_space, &self.config)
        {
            debug!(word = %input.active_last_word, "prediction gated off");
            return PredictionResponse::empty(trigger_input_event);
        }

        let capitalization = Capitalization::classify(
            &input.tokens,
            input.is_new_sentence,
            input.ends_with_space,
            self.config.auto_capitalize,
        );

        let predictions = self.predict_cached(&request.lang, engine, &input.stream);

        PredictionResponse {
            predictions: postprocess(
                predictions,
                request.next_char,
                self.config.insert_space_after_autocomplete,
                capitalization,
            ),
            force_replace: None,
            trigger_input_event,
        }
    }

    /// Cached predictions for an unchanged context, fresh ones otherwise.
    fn predict_cached(&self, lang: &str, engine: &dyn PredictionEngine, stream: &str) -> Vec<String> {
        if let Some(cached) = self.cache.lookup(lang, stream) {
            trace!(lang, stream, "prediction cache hit");
            return cached;
        }

        match engine.predict(stream) {
            Ok(predictions) => {
                let tokens: Vec<String> = predictions.into_iter().map(|p| p.text).collect();
                debug!(lang, stream, count = tokens.len(), "engine predicted");
                self.cache.store(lang, stream, tokens.clone());
                tokens
            }
            Err(e) => {
                warn!(lang, stream, error = %e, "engine prediction failed");
                Vec::new()
            }
        }
    }
}
