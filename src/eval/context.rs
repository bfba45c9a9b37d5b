use std::{collections::BTreeMap, fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    ast::AgentDef,
    config::InterpreterConfig,
    latent::{cosine_similarity, Embedder, HashEmbedder},
    InternalResult,
};

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.75;

/// The persisted part of a [`MemoryContext`]. The registered agent is not
/// included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Snapshot {
    pub mem_short: BTreeMap<String, String>,
    pub mem_long: BTreeMap<String, String>,
    pub mem_latent: BTreeMap<String, Vec<f64>>,
    pub links: BTreeMap<String, String>,
}

/// All mutable runtime state of a session.
///
/// Memory is addressed by target name: `"short"` and `"long"` are the two
/// key/value stores, any other target is ignored on write and reads as empty.
pub struct MemoryContext {
    mem_short: BTreeMap<String, String>,
    mem_long: BTreeMap<String, String>,
    mem_latent: BTreeMap<String, Vec<f64>>,
    links: BTreeMap<String, String>,
    current_agent: Option<AgentDef>,
    input: String,
    output: Option<String>,
    embedder: Box<dyn Embedder>,
    similarity_threshold: f64,
}

impl Default for MemoryContext {
    fn default() -> Self {
        Self::with_embedder(HashEmbedder::default(), DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl fmt::Debug for MemoryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryContext")
            .field("mem_short", &self.mem_short)
            .field("mem_long", &self.mem_long)
            .field("mem_latent", &self.mem_latent)
            .field("links", &self.links)
            .field(
                "current_agent",
                &self.current_agent.as_ref().map(|a| a.name.as_str()),
            )
            .field("input", &self.input)
            .field("output", &self.output)
            .field("similarity_threshold", &self.similarity_threshold)
            .finish()
    }
}

impl MemoryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &InterpreterConfig) -> Self {
        Self::with_embedder(
            HashEmbedder::new(config.embedding_dimensions),
            config.similarity_threshold,
        )
    }

    pub fn with_embedder(embedder: impl Embedder + 'static, similarity_threshold: f64) -> Self {
        Self {
            mem_short: BTreeMap::new(),
            mem_long: BTreeMap::new(),
            mem_latent: BTreeMap::new(),
            links: BTreeMap::new(),
            current_agent: None,
            input: String::new(),
            output: None,
            embedder: Box::new(embedder),
            similarity_threshold,
        }
    }

    pub fn set_mem(&mut self, target: &str, key: impl Into<String>, value: impl Into<String>) {
        match target {
            "short" => {
                self.mem_short.insert(key.into(), value.into());
            }
            "long" => {
                self.mem_long.insert(key.into(), value.into());
            }
            other => tracing::debug!("ignoring write to unknown memory target {:?}", other),
        }
    }

    /// Missing keys and unknown targets read as the empty string.
    pub fn get_mem(&self, target: &str, key: &str) -> String {
        self.lookup(target, key).unwrap_or_default().to_string()
    }

    /// Like [`get_mem`](Self::get_mem) but tells a missing key apart from an
    /// empty value.
    pub fn lookup(&self, target: &str, key: &str) -> Option<&str> {
        let store = match target {
            "short" => &self.mem_short,
            "long" => &self.mem_long,
            _ => return None,
        };
        store.get(key).map(String::as_str)
    }

    pub fn mem_short(&self) -> &BTreeMap<String, String> {
        &self.mem_short
    }

    pub fn mem_long(&self) -> &BTreeMap<String, String> {
        &self.mem_long
    }

    pub fn mem_latent(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.mem_latent
    }

    pub fn embed_latent(&mut self, key: impl Into<String>, text: &str) {
        let vector = self.embedder.embed(text);
        self.mem_latent.insert(key.into(), vector);
    }

    /// Keys of latent entries whose cosine similarity to `query` is strictly
    /// above the threshold, in key order.
    pub fn similar_to(&self, query: &str) -> Vec<String> {
        let query = self.embedder.embed(query);
        self.mem_latent
            .iter()
            .filter(|(_, vector)| cosine_similarity(vector, &query) > self.similarity_threshold)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Stores `from -> to`. A later link from the same key replaces it.
    pub fn link(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.links.insert(from.into(), to.into());
    }

    pub fn links(&self) -> &BTreeMap<String, String> {
        &self.links
    }

    /// Makes `agent` the current one, replacing any previous registration.
    pub fn register_agent(&mut self, agent: AgentDef) {
        if let Some(previous) = &self.current_agent {
            tracing::debug!("replacing registered agent {}", previous.name);
        }
        tracing::info!("registered agent {}", agent.name);
        self.current_agent = Some(agent);
    }

    pub fn current_agent(&self) -> Option<&AgentDef> {
        self.current_agent.as_ref()
    }

    /// Text most recently fed to the agent; read by `= input`.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Result of the last handler run, set by `output = ...` or by reading a
    /// memory slot.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn set_output(&mut self, value: impl Into<String>) {
        self.output = Some(value.into());
    }

    pub fn take_output(&mut self) -> Option<String> {
        self.output.take()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mem_short: self.mem_short.clone(),
            mem_long: self.mem_long.clone(),
            mem_latent: self.mem_latent.clone(),
            links: self.links.clone(),
        }
    }

    /// Replaces all four stores. The registered agent is kept.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.mem_short = snapshot.mem_short;
        self.mem_long = snapshot.mem_long;
        self.mem_latent = snapshot.mem_latent;
        self.links = snapshot.links;
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> InternalResult<()> {
        let data = serde_json::to_string_pretty(&self.snapshot())?;
        fs::write(path.as_ref(), data)?;
        tracing::info!("saved context to {}", path.as_ref().display());
        Ok(())
    }

    /// On failure the context is left untouched.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> InternalResult<()> {
        let data = fs::read_to_string(path.as_ref())?;
        let snapshot: Snapshot = serde_json::from_str(&data)?;
        self.restore(snapshot);
        tracing::info!("loaded context from {}", path.as_ref().display());
        Ok(())
    }
}
