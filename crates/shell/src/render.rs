//! Declarative output of the shell.
//!
//! A [`RenderTree`] lists nodes in paint order: later siblings stack above
//! earlier ones. The host is free to lay it out however its toolkit wants,
//! as long as it keeps that order.

use core_types::{Color, StatusBarStyle};

use crate::config::WebViewConfig;

/// How a node is sized within its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    /// Take the remaining space of the parent's content box.
    Parent,
    /// Absolutely positioned over the whole viewport.
    Viewport,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorSize {
    Small,
    Large,
}

impl IndicatorSize {
    /// Edge length in logical pixels.
    pub fn extent(self) -> f32 {
        match self {
            IndicatorSize::Small => 20.0,
            IndicatorSize::Large => 36.0,
        }
    }
}

/// A spinning activity indicator centered in its node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Indicator {
    pub size: IndicatorSize,
    pub color: Color,
}

impl Indicator {
    pub fn large(color: Color) -> Self {
        Self {
            size: IndicatorSize::Large,
            color,
        }
    }

    pub fn extent(&self) -> f32 {
        self.size.extent()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WebViewNode {
    pub url: String,
    pub fill: Fill,
    pub config: WebViewConfig,
    /// Shown by the view itself during its first load when
    /// `start_in_loading_state` is on.
    pub loading_view: Option<OverlayNode>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayNode {
    pub fill: Fill,
    pub background: Color,
    pub indicator: Indicator,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderNode {
    Container {
        fill: Fill,
        padding_top: f32,
        padding_bottom: f32,
        background: Color,
        children: Vec<RenderNode>,
    },
    StatusBar {
        style: StatusBarStyle,
        background: Color,
    },
    WebView(WebViewNode),
    LoadingOverlay(OverlayNode),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderTree {
    pub root: RenderNode,
}

impl RenderTree {
    /// Depth-first, paint order.
    pub fn nodes(&self) -> Vec<&RenderNode> {
        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    pub fn web_view(&self) -> Option<&WebViewNode> {
        self.nodes().into_iter().find_map(|n| match n {
            RenderNode::WebView(view) => Some(view),
            _ => None,
        })
    }

    pub fn overlay(&self) -> Option<&OverlayNode> {
        self.nodes().into_iter().find_map(|n| match n {
            RenderNode::LoadingOverlay(overlay) => Some(overlay),
            _ => None,
        })
    }

    pub fn status_bar(&self) -> Option<(StatusBarStyle, Color)> {
        self.nodes().into_iter().find_map(|n| match n {
            RenderNode::StatusBar { style, background } => Some((*style, *background)),
            _ => None,
        })
    }
}

fn collect<'a>(node: &'a RenderNode, out: &mut Vec<&'a RenderNode>) {
    out.push(node);
    if let RenderNode::Container { children, .. } = node {
        for child in children {
            collect(child, out);
        }
    }
}
