//! Tool Generator - bulk creation of tools from the operation catalog.
//!
//! The generator selects catalog entries, builds a [`Tool`] for each through
//! the [`ToolFactory`], and stores them in its [`ToolRegistry`]. It can also
//! check the registry for structural problems and export a snapshot for
//! diagnostics.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::catalog::OperationDescriptor;
use super::definitions;
use super::error::ToolError;
use super::factory::{DEFAULT_NAME_PREFIX, ToolCollaborators, ToolFactory};
use super::registry::ToolRegistry;
use super::tool::Tool;
use crate::api::{ApiTransport, ErrorClassifier};

// ============================================================================
// Options
// ============================================================================

/// Selection and wiring for one [`ToolGenerator::generate`] call.
///
/// Empty `groups` or `include_names` lists select everything, the same as
/// leaving them unset.
#[derive(Clone, Default)]
pub struct GenerateOptions {
    pub groups: Option<Vec<String>>,
    pub include_names: Option<Vec<String>>,
    pub exclude_names: Option<Vec<String>>,
    pub name_prefix: Option<String>,
    pub transport: Option<Arc<dyn ApiTransport>>,
    pub classifier: ErrorClassifier,
}

impl GenerateOptions {
    pub fn with_transport(transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            transport: Some(transport),
            ..Self::default()
        }
    }

    fn prefix(&self) -> &str {
        self.name_prefix.as_deref().unwrap_or(DEFAULT_NAME_PREFIX)
    }

    fn selects(&self, descriptor: &OperationDescriptor) -> bool {
        let in_group = match self.groups.as_deref() {
            Some(groups) if !groups.is_empty() => groups
                .iter()
                .any(|g| g.eq_ignore_ascii_case(descriptor.group)),
            _ => true,
        };
        let included = match self.include_names.as_deref() {
            Some(names) if !names.is_empty() => names.iter().any(|n| n == descriptor.name),
            _ => true,
        };
        let excluded = self
            .exclude_names
            .as_deref()
            .is_some_and(|names| names.iter().any(|n| n == descriptor.name));

        in_group && included && !excluded
    }
}

impl std::fmt::Debug for GenerateOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateOptions")
            .field("groups", &self.groups)
            .field("include_names", &self.include_names)
            .field("exclude_names", &self.exclude_names)
            .field("name_prefix", &self.name_prefix)
            .field("transport", &self.transport.is_some())
            .finish()
    }
}

// ============================================================================
// Reports
// ============================================================================

/// Catalog and registry counts for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupStats {
    pub available: usize,
    pub registered: usize,
}

/// Catalog size against registry contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub available: usize,
    pub registered: usize,
    pub by_group: BTreeMap<String, GroupStats>,
}

/// A structural problem found by [`ToolGenerator::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub tool: String,
    pub problem: String,
}

impl ValidationIssue {
    fn new(tool: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            problem: problem.into(),
        }
    }
}

/// One registered tool, as exported.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
    pub group: String,
    pub parameters: Vec<String>,
    pub required: Vec<String>,
    pub input_schema: Value,
}

/// Diagnostic snapshot of the generator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorExport {
    pub exported_at: DateTime<Utc>,
    pub name_prefix: String,
    pub stats: GenerationStats,
    pub issues: Vec<ValidationIssue>,
    pub tools: Vec<ToolSummary>,
}

// ============================================================================
// Generator
// ============================================================================

/// Builds and owns the registry of generated tools.
#[derive(Debug, Clone)]
pub struct ToolGenerator {
    catalog: Vec<&'static OperationDescriptor>,
    registry: ToolRegistry,
    name_prefix: String,
}

impl Default for ToolGenerator {
    fn default() -> Self {
        Self::new(definitions::catalog())
    }
}

impl ToolGenerator {
    /// Generator over a custom catalog.
    pub fn new(catalog: Vec<&'static OperationDescriptor>) -> Self {
        Self {
            catalog,
            registry: ToolRegistry::new(),
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
        }
    }

    pub fn catalog(&self) -> &[&'static OperationDescriptor] {
        &self.catalog
    }

    /// Catalog entries chosen by `options`, in catalog order.
    pub fn select(&self, options: &GenerateOptions) -> Vec<&'static OperationDescriptor> {
        self.catalog
            .iter()
            .copied()
            .filter(|d| options.selects(d))
            .collect()
    }

    /// Build and register a tool for every selected operation.
    ///
    /// Stops at the first duplicate name. Tools registered before the
    /// failure stay in the registry.
    pub fn generate(&mut self, options: &GenerateOptions) -> Result<Vec<Tool>, ToolError> {
        let factory = ToolFactory::new(options.prefix());
        let collaborators = ToolCollaborators {
            transport: options.transport.clone(),
            classifier: options.classifier.clone(),
            validator_override: None,
        };
        self.name_prefix = factory.prefix().to_string();

        let selected = self.select(options);
        debug!(selected = selected.len(), ?options, "Generating tools");

        let mut generated = Vec::with_capacity(selected.len());
        for descriptor in selected {
            let tool = factory.build(descriptor, &collaborators);
            self.registry.register(tool.clone())?;
            generated.push(tool);
        }

        info!(
            "Generated {} tools ({} registered)",
            generated.len(),
            self.registry.len()
        );
        Ok(generated)
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ToolRegistry {
        &mut self.registry
    }

    pub fn into_registry(self) -> ToolRegistry {
        self.registry
    }

    /// Empty the registry so `generate` can run again.
    pub fn clear(&mut self) {
        self.registry.clear();
    }

    /// Catalog counts against registered tools, per group.
    pub fn stats(&self) -> GenerationStats {
        let mut by_group: BTreeMap<String, GroupStats> = BTreeMap::new();
        for descriptor in &self.catalog {
            by_group
                .entry(descriptor.group.to_string())
                .or_default()
                .available += 1;
        }
        for (group, count) in self.registry.stats().by_group {
            by_group.entry(group).or_default().registered += count;
        }

        GenerationStats {
            available: self.catalog.len(),
            registered: self.registry.len(),
            by_group,
        }
    }

    /// Structural problems in the registry. Empty when everything is sound.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for (key, tool) in self.registry.entries() {
            if tool.name.is_empty() {
                issues.push(ValidationIssue::new(key, "name is empty"));
            } else if !tool
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                issues.push(ValidationIssue::new(
                    key,
                    "name contains characters outside [A-Za-z0-9_-]",
                ));
            }
            if key != tool.name {
                issues.push(ValidationIssue::new(
                    key,
                    format!("registered under a different key than its name '{}'", tool.name),
                ));
            }
            if tool.description.trim().is_empty() {
                issues.push(ValidationIssue::new(key, "description is empty"));
            }
            if tool.group.trim().is_empty() {
                issues.push(ValidationIssue::new(key, "group is empty"));
            }
            if let Err(errors) = tool.validator.validate(&Value::Object(tool.examples.clone())) {
                for error in errors {
                    issues.push(ValidationIssue::new(
                        key,
                        format!("example '{}' {}", error.field, error.message),
                    ));
                }
            }
        }

        if !issues.is_empty() {
            warn!("Registry validation found {} issues", issues.len());
        }
        issues
    }

    /// Snapshot of the registry and generation stats.
    pub fn export_config(&self) -> GeneratorExport {
        let tools = self
            .registry
            .tools()
            .map(|tool| ToolSummary {
                name: tool.name.clone(),
                description: tool.description.clone(),
                group: tool.group.clone(),
                parameters: tool.validator.rules().iter().map(|r| r.name.clone()).collect(),
                required: tool.validator.required_names().map(String::from).collect(),
                input_schema: tool.json_schema().into(),
            })
            .collect();

        GeneratorExport {
            exported_at: Utc::now(),
            name_prefix: self.name_prefix.clone(),
            stats: self.stats(),
            issues: self.validate(),
            tools,
        }
    }
}
