use std::rc::Rc;

use super::focus::{FocusSurface, SurfaceHandle};
use super::glyph::{render_leading_glyph, Glyph, LeadingGlyph};
use super::segments::{split_at_cursor, Segmentation, Segments};
use super::state::{CommandLineState, FocusIntent, ViewLocalState};

/// Everything the overlay draws for one state snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// Hidden output keeps its layout slot but draws nothing.
    pub hidden: bool,
    pub leading: LeadingGlyph,
    pub prompt: String,
    pub segments: Option<Segments>,
    pub level: usize,
}

/// One piece of the output, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    Glyph(&'a Glyph),
    Text(&'a str),
    Cursor,
}

impl RenderOutput {
    /// Leading glyph, prompt, text before the cursor, cursor, text after.
    /// Empty strings are skipped; the cursor is always present.
    pub fn nodes(&self) -> Vec<Node<'_>> {
        let mut nodes = Vec::new();

        match &self.leading {
            LeadingGlyph::Icons(glyphs) => nodes.extend(glyphs.iter().map(Node::Glyph)),
            LeadingGlyph::Text(text) if !text.is_empty() => nodes.push(Node::Text(text)),
            LeadingGlyph::Text(_) => {}
        }

        if !self.prompt.is_empty() {
            nodes.push(Node::Text(&self.prompt));
        }

        if let Some(segments) = &self.segments {
            if !segments.before.is_empty() {
                nodes.push(Node::Text(&segments.before));
            }
        }

        nodes.push(Node::Cursor);

        if let Some(segments) = &self.segments {
            if !segments.after.is_empty() {
                nodes.push(Node::Text(&segments.after));
            }
        }

        nodes
    }

    pub fn before_cursor(&self) -> &str {
        self.segments.as_ref().map_or("", |s| s.before.as_str())
    }
}

/// Computes the output for `state`, latching `local` focused the first time
/// the state is visible. The returned intent must be applied after the
/// output is committed.
pub fn render(
    state: &CommandLineState,
    local: &mut ViewLocalState,
    segmentation: Segmentation,
) -> (RenderOutput, FocusIntent) {
    let intent = local.activate(state.visible);

    let output = RenderOutput {
        hidden: !state.visible,
        leading: render_leading_glyph(&state.first_char, state.show_icons),
        prompt: state.prompt.clone(),
        segments: split_at_cursor(&state.content, state.position, segmentation),
        level: state.level,
    };

    (output, intent)
}

/// Command line overlay view: renders snapshots, keeps the last committed
/// output for change detection, and forwards the one-shot focus request to
/// the attached surface.
#[derive(Debug, Default)]
pub struct CommandLineView {
    local: ViewLocalState,
    segmentation: Segmentation,
    surface: SurfaceHandle,
    pending_focus: FocusIntent,
    committed: Option<RenderOutput>,
}

impl CommandLineView {
    pub fn new(segmentation: Segmentation) -> Self {
        Self {
            segmentation,
            ..Self::default()
        }
    }

    pub fn segmentation(&self) -> Segmentation {
        self.segmentation
    }

    pub fn set_segmentation(&mut self, segmentation: Segmentation) {
        self.segmentation = segmentation;
    }

    /// No state ever supplied means no output at all, as opposed to hidden.
    pub fn render(&mut self, state: Option<&CommandLineState>) -> Option<RenderOutput> {
        let state = state?;
        let (output, intent) = render(state, &mut self.local, self.segmentation);
        if intent == FocusIntent::Acquire {
            tracing::debug!("Command line became visible; focus requested");
            self.pending_focus = intent;
        }
        Some(output)
    }

    /// Stores `output` as the current output. Returns whether it differs from
    /// what was committed before.
    pub fn commit(&mut self, output: Option<RenderOutput>) -> bool {
        if self.committed == output {
            return false;
        }
        self.committed = output;
        true
    }

    /// Renders and commits in one step.
    pub fn update(&mut self, state: Option<&CommandLineState>) -> bool {
        let output = self.render(state);
        self.commit(output)
    }

    pub fn committed(&self) -> Option<&RenderOutput> {
        self.committed.as_ref()
    }

    pub fn attach_surface(&mut self, surface: &Rc<dyn FocusSurface>) {
        self.surface.attach(surface);
    }

    pub fn detach_surface(&mut self) {
        self.surface.clear();
    }

    /// Applies a pending focus request once a surface exists. Failures are
    /// ignored. Returns true if focus was requested from a surface.
    pub fn apply_focus(&mut self) -> bool {
        if self.pending_focus != FocusIntent::Acquire {
            return false;
        }
        let Some(surface) = self.surface.get() else {
            return false;
        };

        self.pending_focus = FocusIntent::None;
        if let Err(e) = surface.focus() {
            tracing::debug!("Ignoring focus failure: {}", e);
        }
        true
    }
}
