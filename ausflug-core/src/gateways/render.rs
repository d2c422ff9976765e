use crate::map::MapPlan;

/// Turns a map plan into an artifact that can be embedded into the host UI.
pub trait MapRenderer {
    fn render(&self, plan: &MapPlan) -> anyhow::Result<String>;
}
