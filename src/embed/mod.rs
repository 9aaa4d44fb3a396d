//! Embedded static resources for the viewer.
//!
//! The browser side of the preview is three files compiled into the
//! binary: the page shell, the stylesheet, and the websocket client
//! script. The script needs the actual websocket port, injected through
//! the typed template mechanism.

mod template;

pub use template::{Template, TemplateVars};

pub mod serve {
    use super::{Template, TemplateVars};

    /// Variables for viewer.js template.
    pub struct ViewerVars {
        pub ws_port: u16,
    }

    impl TemplateVars for ViewerVars {
        fn apply(&self, content: &str) -> String {
            content.replace("__MDCAST_WS_PORT__", &self.ws_port.to_string())
        }
    }

    /// Viewer page shell.
    pub const VIEWER_HTML: &str = include_str!("serve/viewer.html");

    /// Viewer stylesheet.
    pub const VIEWER_CSS: &str = include_str!("serve/viewer.css");

    /// WebSocket client script template.
    pub const VIEWER_JS: Template<ViewerVars> = Template::new(include_str!("serve/viewer.js"));
}

#[cfg(test)]
mod tests {
    use super::serve::{VIEWER_JS, ViewerVars};

    #[test]
    fn test_ws_port_injection() {
        let js = VIEWER_JS.render(&ViewerVars { ws_port: 35730 });
        assert!(js.contains("35730"));
        assert!(!js.contains("__MDCAST_WS_PORT__"));
    }
}
