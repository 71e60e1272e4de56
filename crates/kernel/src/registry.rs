use anyhow::Context;
use std::sync::Arc;

use crate::module::{InitCtx, Module, SchemaFragment};

/// Module registry owning the application's modules in registration order
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a new module registry
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Register a module with the registry
    pub fn register(&mut self, module: Arc<dyn Module>) {
        self.modules.push(module);
    }

    /// Get all registered modules
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    /// Initialize modules in registration order
    pub async fn init_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("initializing {} modules", self.modules.len());

        for module in &self.modules {
            tracing::info!(module = module.name(), "initializing module");

            module
                .init(ctx)
                .await
                .with_context(|| format!("failed to initialize module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Stop modules in reverse registration order
    pub async fn stop_modules(&self) -> anyhow::Result<()> {
        tracing::info!("stopping {} modules", self.modules.len());

        for module in self.modules.iter().rev() {
            tracing::info!(module = module.name(), "stopping module");

            module
                .stop()
                .await
                .with_context(|| format!("failed to stop module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Collect schema fragments from all modules, ordered by module name
    /// then fragment id
    pub fn collect_schema(&self) -> Vec<(String, SchemaFragment)> {
        let mut fragments: Vec<(String, SchemaFragment)> = self
            .modules
            .iter()
            .flat_map(|module| {
                module
                    .schema()
                    .into_iter()
                    .map(move |fragment| (module.name().to_string(), fragment))
            })
            .collect();

        fragments.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(b.1.id)));

        fragments
    }

    /// Apply every collected schema fragment to the pool
    pub async fn apply_schema(&self, db: &libris_db::DbPool) -> anyhow::Result<()> {
        for (module, fragment) in self.collect_schema() {
            let label = format!("{module}/{}", fragment.id);
            tracing::info!(schema = %label, "applying schema fragment");
            libris_db::apply_schema(db, &label, fragment.sql).await?;
        }

        Ok(())
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
