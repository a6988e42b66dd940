//! Build-lifecycle hooks
//!
//! The host build triggers a merge either automatically once the
//! application image exists, or through an on-demand target. Both are
//! modeled as stages on a small registry of callbacks, so the pipeline
//! itself never knows what invoked it.

/// When a registered hook fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    /// Automatically, after the application image is produced
    PostBuild,
    /// On demand, from a target depending on the three base binaries
    Manual,
}

/// Registry of build-stage callbacks, run in registration order
pub struct HookRegistry<T> {
    hooks: Vec<(BuildStage, Box<dyn FnMut() -> T>)>,
}

impl<T> HookRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register `hook` to run when `stage` fires.
    pub fn register(&mut self, stage: BuildStage, hook: impl FnMut() -> T + 'static) {
        self.hooks.push((stage, Box::new(hook)));
    }

    /// Run every hook registered for `stage`, collecting their results.
    pub fn fire(&mut self, stage: BuildStage) -> Vec<T> {
        self.hooks
            .iter_mut()
            .filter(|(s, _)| *s == stage)
            .map(|(_, hook)| hook())
            .collect()
    }

    /// Number of registered hooks across all stages
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl<T> Default for HookRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_the_requested_stage() {
        let mut registry = HookRegistry::new();
        registry.register(BuildStage::PostBuild, || "post");
        registry.register(BuildStage::Manual, || "manual");

        assert_eq!(registry.fire(BuildStage::Manual), vec!["manual"]);
        assert_eq!(registry.fire(BuildStage::PostBuild), vec!["post"]);
    }

    #[test]
    fn fires_in_registration_order() {
        let mut registry = HookRegistry::new();
        registry.register(BuildStage::Manual, || 1);
        registry.register(BuildStage::Manual, || 2);
        registry.register(BuildStage::Manual, || 3);

        assert_eq!(registry.fire(BuildStage::Manual), vec![1, 2, 3]);
    }

    #[test]
    fn empty_registry_fires_nothing() {
        let mut registry: HookRegistry<()> = HookRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.fire(BuildStage::PostBuild).is_empty());
    }
}
