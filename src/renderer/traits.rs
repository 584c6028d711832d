use crate::config::DumpConfig;
use crate::error::DumpResult;
use crate::value::ReferenceKey;

/// A reference currently being rendered by some ancestor frame
#[derive(Debug)]
pub struct OpenReference<'c> {
    key: ReferenceKey,
    parent: Option<&'c OpenReference<'c>>,
}

/// Configuration context for rendering operations.
///
/// Each frame owns its own context; nested values get a fresh one with the
/// depth bumped by one. Open references form a stack that lives on the call
/// stack, so siblings never see each other's entries.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'c> {
    pub depth: usize,
    pub config: &'c DumpConfig,
    open: Option<&'c OpenReference<'c>>,
}

impl<'c> RenderContext<'c> {
    pub fn new(config: &'c DumpConfig) -> Self {
        Self {
            depth: 0,
            config,
            open: None,
        }
    }

    pub fn with_depth(&self, depth: usize) -> Self {
        Self {
            depth,
            config: self.config,
            open: self.open,
        }
    }

    pub fn nested(&self) -> Self {
        self.with_depth(self.depth + 1)
    }

    pub fn indent(&self) -> String {
        self.config.indent.repeat(self.depth)
    }

    /// Whether an ancestor frame is already rendering this reference
    pub fn is_open(&self, key: &ReferenceKey) -> bool {
        let mut current = self.open;
        while let Some(open) = current {
            if open.key == *key {
                return true;
            }
            current = open.parent;
        }
        false
    }

    /// Builds the stack entry for a reference about to be rendered
    pub fn open_reference(&self, key: ReferenceKey) -> OpenReference<'c> {
        OpenReference {
            key,
            parent: self.open,
        }
    }

    /// Context for rendering underneath `open`, at the same depth
    pub fn entering<'n>(&self, open: &'n OpenReference<'n>) -> RenderContext<'n>
    where
        'c: 'n,
    {
        RenderContext {
            depth: self.depth,
            config: self.config,
            open: Some(open),
        }
    }
}

/// Core rendering trait for every inspected value
pub trait Render {
    fn render(&self, context: &RenderContext<'_>) -> DumpResult<String>;
}
