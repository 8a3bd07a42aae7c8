//! Tool Registry - name-keyed store of generated tools.
//!
//! This module provides:
//! - Registration with duplicate-name rejection
//! - Lookup by name, by group, and by free-text search
//! - In-place updates and removal
//! - Aggregate statistics recomputed from the current contents

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::error::ToolError;
use super::tool::Tool;

// ============================================================================
// Tool Registry
// ============================================================================

/// Registry of generated tools, ordered by name.
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Tool>,
}

/// Changes applied by [`ToolRegistry::update`]. The name never changes.
#[derive(Debug, Clone, Default)]
pub struct ToolPatch {
    pub description: Option<String>,
    pub group: Option<String>,
    pub examples: Option<Map<String, Value>>,
}

/// Tool counts, total and per group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total: usize,
    pub by_group: BTreeMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Fails if the name is taken; the existing tool is
    /// left untouched.
    pub fn register(&mut self, tool: Tool) -> Result<(), ToolError> {
        if self.tools.contains_key(&tool.name) {
            warn!("Rejected duplicate tool: {}", tool.name);
            return Err(ToolError::duplicate(tool.name));
        }
        debug!("Registered tool: {}", tool.name);
        self.tools.insert(tool.name.clone(), tool);
        Ok(())
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Check if a tool exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tools belonging to `group`, compared case-insensitively.
    pub fn get_by_group(&self, group: &str) -> Vec<&Tool> {
        self.tools
            .values()
            .filter(|t| t.group.eq_ignore_ascii_case(group))
            .collect()
    }

    /// Tools whose name or description contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Tool> {
        let needle = query.to_lowercase();
        self.tools
            .values()
            .filter(|t| {
                t.name.to_lowercase().contains(&needle)
                    || t.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Apply `patch` to the named tool.
    pub fn update(&mut self, name: &str, patch: ToolPatch) -> Result<&Tool, ToolError> {
        let tool = self
            .tools
            .get_mut(name)
            .ok_or_else(|| ToolError::not_found(name))?;

        if let Some(description) = patch.description {
            tool.description = description;
        }
        if let Some(group) = patch.group {
            tool.group = group;
        }
        if let Some(examples) = patch.examples {
            tool.examples = examples;
        }
        debug!("Updated tool: {}", name);
        Ok(tool)
    }

    /// Unregister a tool.
    pub fn remove(&mut self, name: &str) -> Option<Tool> {
        self.tools.remove(name)
    }

    /// Remove every tool.
    pub fn clear(&mut self) {
        let count = self.tools.len();
        self.tools.clear();
        info!("Cleared {} tools from registry", count);
    }

    /// All tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// All tools, sorted by name.
    pub fn tools(&self) -> impl Iterator<Item = &Tool> {
        self.tools.values()
    }

    /// Registry keys paired with their tools.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Tool)> {
        self.tools.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Counts recomputed from the current contents.
    pub fn stats(&self) -> RegistryStats {
        let mut by_group = BTreeMap::new();
        for tool in self.tools.values() {
            *by_group.entry(tool.group.clone()).or_insert(0) += 1;
        }
        RegistryStats {
            total: self.tools.len(),
            by_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Outcome;
    use crate::domains::tools::handlers::ToolHandler;
    use crate::domains::tools::schema::Validator;
    use std::sync::Arc;

    struct Fixed(&'static str);

    #[async_trait::async_trait]
    impl ToolHandler for Fixed {
        async fn call(&self, _arguments: Value) -> Outcome<Value> {
            Outcome::success(Value::from(self.0), 200)
        }
    }

    fn tool(name: &str, group: &str, description: &str, marker: &'static str) -> Tool {
        Tool::new(
            name,
            description,
            group,
            Arc::new(Validator::default()),
            Arc::new(Fixed(marker)),
        )
    }

    fn populated() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry
            .register(tool("evolution_send_text", "message", "Message Controller: Send a text", "a"))
            .unwrap();
        registry
            .register(tool("evolution_find_chats", "chat", "Chat Controller: Find chats", "b"))
            .unwrap();
        registry
            .register(tool("evolution_archive_chat", "chat", "Chat Controller: Archive; SEND nothing", "c"))
            .unwrap();
        registry
    }

    #[test]
    fn test_duplicate_rejected_and_original_kept() {
        let mut registry = populated();
        let err = registry
            .register(tool("evolution_send_text", "other", "Impostor", "z"))
            .unwrap_err();
        assert_eq!(err, ToolError::Duplicate("evolution_send_text".into()));

        let kept = registry.get("evolution_send_text").unwrap();
        assert_eq!(kept.group, "message");
        assert_eq!(kept.description, "Message Controller: Send a text");
        let outcome = tokio_test::block_on(kept.call(Value::Null));
        assert_eq!(outcome.data, Some(Value::from("a")));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_search_matches_name_or_description() {
        let registry = populated();
        let names: Vec<_> = registry.search("send").iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["evolution_archive_chat", "evolution_send_text"]);
        assert!(registry.search("nothing-like-this").is_empty());
        assert_eq!(registry.search("CHATS").len(), 1);
    }

    #[test]
    fn test_group_lookup_and_stats() {
        let registry = populated();
        assert_eq!(registry.get_by_group("chat").len(), 2);
        assert_eq!(registry.get_by_group("Chat").len(), 2);
        assert!(registry.get_by_group("group").is_empty());

        let stats = registry.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_group["chat"], 2);
        assert_eq!(stats.by_group["message"], 1);
    }

    #[test]
    fn test_update_remove_clear() {
        let mut registry = populated();
        let updated = registry
            .update(
                "evolution_find_chats",
                ToolPatch {
                    group: Some("inbox".into()),
                    ..ToolPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.group, "inbox");
        assert_eq!(registry.stats().by_group.get("inbox"), Some(&1));

        assert_eq!(
            registry.update("missing", ToolPatch::default()).unwrap_err(),
            ToolError::NotFound("missing".into())
        );

        assert!(registry.remove("evolution_find_chats").is_some());
        assert!(registry.remove("evolution_find_chats").is_none());
        assert_eq!(registry.names(), vec!["evolution_archive_chat", "evolution_send_text"]);

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.stats(), RegistryStats::default());
    }
}
