/// URL prefix the embedded page navigates to when its notification queue
/// becomes non-empty. The URL carries no payload; it is intercepted,
/// cancelled, and answered with a queue fetch.
pub const CALLBACK_SCHEME: &str = "vellum-callback://";

/// How a navigation request originated, as reported by the host web view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// Direct user activation of a hyperlink.
    LinkActivated,
    /// Anything else: initial load, redirects, script-driven loads.
    Other,
}

/// Verdict handed back to the host web view for a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Cancel,
}
