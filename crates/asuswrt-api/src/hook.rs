// Hook query batching
//
// The telemetry endpoint takes one string of semicolon-joined pseudo
// function calls, e.g. `nvram_get(productid);cpu_usage(appobj)`, and
// answers all of them in a single round trip. `HookQuery` composes
// named fragments into that string so callers keep the batching
// instead of paying one round trip per metric.

/// Builder for a combined hook query string.
#[derive(Debug, Clone, Default)]
pub struct HookQuery {
    hooks: Vec<String>,
}

impl HookQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read one NVRAM variable: `nvram_get(<name>)`.
    pub fn nvram_get(mut self, name: &str) -> Self {
        self.hooks.push(format!("nvram_get({name})"));
        self
    }

    /// Call a hook in structured-object mode: `<name>(appobj)`.
    pub fn appobj(mut self, name: &str) -> Self {
        self.hooks.push(format!("{name}(appobj)"));
        self
    }

    /// Append a hook fragment verbatim, for calls the named helpers
    /// don't cover.
    pub fn raw(mut self, fragment: impl Into<String>) -> Self {
        self.hooks.push(fragment.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// The combined query string: fragments joined by `;`, in the order
    /// they were added.
    pub fn build(&self) -> String {
        self.hooks.join(";")
    }
}
