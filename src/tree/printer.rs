//! Box-drawing tree renderer

use crossterm::style::{Color, Stylize};

use crate::models::{KindCategory, ResourceKind};
use crate::tree::models::ResourceNode;

const LAST_CONNECTOR: &str = "└── ";
const MID_CONNECTOR: &str = "├── ";
const LAST_PREFIX: &str = "    ";
const MID_PREFIX: &str = "│   ";

/// One colour per kind category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub workload: Color,
    pub pod: Color,
    pub service: Color,
    pub config: Color,
    pub storage: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            workload: Color::DarkBlue,
            pod: Color::DarkGreen,
            service: Color::DarkYellow,
            config: Color::DarkMagenta,
            storage: Color::DarkCyan,
        }
    }
}

impl Palette {
    /// Colour for a kind, `None` for kinds without a category
    pub fn color_for(&self, kind: ResourceKind) -> Option<Color> {
        kind.category().map(|category| match category {
            KindCategory::Workload => self.workload,
            KindCategory::Pod => self.pod,
            KindCategory::Service => self.service,
            KindCategory::Config => self.config,
            KindCategory::Storage => self.storage,
        })
    }
}

/// Parse a colour name such as `dark_blue` or `cyan`
pub fn parse_color(name: &str) -> Option<Color> {
    Color::try_from(name.trim().to_lowercase().as_str()).ok()
}

/// Renders a [`ResourceNode`] tree into text lines
#[derive(Debug, Clone, Default)]
pub struct Printer {
    palette: Option<Palette>,
}

impl Printer {
    /// Printer without colour
    pub fn plain() -> Self {
        Self { palette: None }
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self {
            palette: Some(palette),
        }
    }

    pub fn new(palette: Option<Palette>) -> Self {
        Self { palette }
    }

    /// Pre-order lines for `root`, which is always drawn as a last sibling
    pub fn render(&self, root: &ResourceNode) -> Vec<String> {
        let mut lines = Vec::with_capacity(root.count());
        self.render_node(root, "", true, &mut lines);
        lines
    }

    fn render_node(
        &self,
        node: &ResourceNode,
        prefix: &str,
        is_last: bool,
        out: &mut Vec<String>,
    ) {
        let connector = if is_last { LAST_CONNECTOR } else { MID_CONNECTOR };
        out.push(format!("{prefix}{connector}{}", self.label(node)));

        let child_prefix = format!("{prefix}{}", if is_last { LAST_PREFIX } else { MID_PREFIX });
        let last_index = node.children.len().saturating_sub(1);
        for (i, child) in node.children.iter().enumerate() {
            self.render_node(child, &child_prefix, i == last_index, out);
        }
    }

    fn label(&self, node: &ResourceNode) -> String {
        let label = format!("{}/{}", node.kind, node.name);
        match self.palette.and_then(|p| p.color_for(node.kind)) {
            Some(color) => label.with(color).to_string(),
            None => label,
        }
    }
}
