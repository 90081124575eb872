//! # Timing Module
//!
//! Hierarchical wall-clock timing for benchmark phases.
//!
//! A [`TimingNode`] starts its clock when it is created and freezes it on
//! [`TimingNode::stop`]. Children are opened through [`TimingNode::child`],
//! which hands back a [`Scope`] guard: the child stays open while the guard
//! lives and is stopped when the guard drops, so a phase that bails out with
//! `?` (or panics) still records how long it ran.
//!
//! ## Rendering
//! [`TimingNode::render`] writes one line per node, pre-order:
//!
//! ```text
//! Main	1.2345
//! 	Main.i32 Run (2^25)	1.2000
//! 		Main.i32 Run (2^25).Create Data	0.4000
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

/// Label parts for a child node.
///
/// The child's full label is `parent + "." + prefix + name + postfix`, where
/// `name` falls back to the default given to [`Label::new`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Label<'a> {
    prefix: &'a str,
    name: Option<&'a str>,
    fallback: &'a str,
    postfix: &'a str,
}

impl<'a> Label<'a> {
    /// Creates a label that uses `fallback` unless a name is supplied
    pub fn new(fallback: &'a str) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    /// Overrides the default name
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// Text placed before the name
    pub fn prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = prefix;
        self
    }

    /// Text placed after the name
    pub fn postfix(mut self, postfix: &'a str) -> Self {
        self.postfix = postfix;
        self
    }

    fn qualify(&self, parent: &str) -> String {
        format!(
            "{}.{}{}{}",
            parent,
            self.prefix,
            self.name.unwrap_or(self.fallback),
            self.postfix
        )
    }
}

impl<'a> From<&'a str> for Label<'a> {
    fn from(name: &'a str) -> Self {
        Label::new(name)
    }
}

/// A named, self-contained elapsed-time recorder with ordered children
#[derive(Debug)]
pub struct TimingNode {
    label: String,
    started: Instant,
    elapsed: Option<Duration>,
    children: Vec<TimingNode>,
}

impl TimingNode {
    /// Creates a node and starts its clock immediately
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            started: Instant::now(),
            elapsed: None,
            children: Vec::new(),
        }
    }

    /// Creates, registers and starts a child node
    ///
    /// The child is stopped when the returned guard goes out of scope.
    ///
    /// # Examples
    /// ```
    /// use vector_bench::timing::{Label, TimingNode};
    ///
    /// let mut root = TimingNode::start("Main");
    /// {
    ///     let mut case = root.child(Label::new("Run").prefix("u8 "));
    ///     case.child("Create Data");
    /// }
    /// root.stop();
    ///
    /// assert_eq!(root.children()[0].label(), "Main.u8 Run");
    /// assert_eq!(root.children()[0].children()[0].label(), "Main.u8 Run.Create Data");
    /// ```
    pub fn child<'a>(&mut self, label: impl Into<Label<'a>>) -> Scope<'_> {
        let node = TimingNode::start(label.into().qualify(&self.label));
        let idx = self.children.len();
        self.children.push(node);
        Scope {
            node: &mut self.children[idx],
        }
    }

    /// Freezes the elapsed time. Later calls are no-ops.
    pub fn stop(&mut self) {
        if self.elapsed.is_none() {
            self.elapsed = Some(self.started.elapsed());
        }
    }

    /// Whether [`stop`](Self::stop) has been called
    pub fn is_stopped(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Frozen duration, or the time elapsed so far if still running
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.started.elapsed())
    }

    /// Full label of this node
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Children in the order they were opened
    pub fn children(&self) -> &[TimingNode] {
        &self.children
    }

    /// Writes this node and its descendants as tab-indented lines
    pub fn render<W: fmt::Write>(&self, out: &mut W, indent: usize) -> fmt::Result {
        for _ in 0..indent {
            out.write_char('\t')?;
        }
        writeln!(out, "{}\t{:.4}", self.label, self.elapsed().as_secs_f64())?;
        for child in &self.children {
            child.render(out, indent + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for TimingNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

/// Guard over an open child node; stops it on drop
#[derive(Debug)]
pub struct Scope<'a> {
    node: &'a mut TimingNode,
}

impl Deref for Scope<'_> {
    type Target = TimingNode;

    fn deref(&self) -> &TimingNode {
        &*self.node
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut TimingNode {
        &mut *self.node
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.node.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn frozen(label: &str, millis: u64) -> TimingNode {
        let mut node = TimingNode::start(label);
        node.elapsed = Some(Duration::from_millis(millis));
        node
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut node = TimingNode::start("Main");
        node.stop();
        let first = node.elapsed();
        thread::sleep(Duration::from_millis(5));
        node.stop();
        assert_eq!(node.elapsed(), first);
        assert!(node.is_stopped());
    }

    #[test]
    fn test_elapsed_grows_while_open() {
        let node = TimingNode::start("Main");
        let before = node.elapsed();
        thread::sleep(Duration::from_millis(2));
        assert!(node.elapsed() >= before);
        assert!(!node.is_stopped());
    }

    #[test]
    fn test_scope_stops_child_on_drop() {
        let mut root = TimingNode::start("Main");
        {
            let child = root.child("Phase");
            assert!(!child.is_stopped());
        }
        assert!(root.children()[0].is_stopped());
        assert!(!root.is_stopped());
    }

    #[test]
    fn test_scope_stops_child_on_early_return() {
        fn failing(root: &mut TimingNode) -> Result<(), &'static str> {
            let mut case = root.child("Case");
            let _phase = case.child("Phase");
            Err("boom")
        }

        let mut root = TimingNode::start("Main");
        assert!(failing(&mut root).is_err());
        let case = &root.children()[0];
        assert!(case.is_stopped());
        assert!(case.children()[0].is_stopped());
    }

    #[test]
    fn test_sibling_timing_is_independent() {
        let mut root = TimingNode::start("Main");
        {
            let _slow = root.child("Slow");
            thread::sleep(Duration::from_millis(20));
        }
        let slow = root.children()[0].elapsed();
        {
            let _fast = root.child("Fast");
        }
        assert_eq!(root.children()[0].elapsed(), slow);
        assert!(slow >= Duration::from_millis(20));
        assert!(root.children()[1].elapsed() < slow);
    }

    #[test]
    fn test_label_composition() {
        let mut root = TimingNode::start("Main");
        let case = root.child(Label::new("Run").prefix("i32 ").postfix(" (2^25)"));
        assert_eq!(case.label(), "Main.i32 Run (2^25)");
        drop(case);

        let named = root.child(Label::new("Vectorized").name("Kernel").postfix("(On)"));
        assert_eq!(named.label(), "Main.Kernel(On)");
    }

    #[test]
    fn test_render_preorder_with_depth() {
        let mut root = frozen("Main", 1500);
        let mut a = frozen("Main.a", 1000);
        a.children.push(frozen("Main.a.x", 250));
        a.children.push(frozen("Main.a.y", 125));
        root.children.push(a);
        root.children.push(frozen("Main.b", 12));

        assert_eq!(
            root.to_string(),
            "Main\t1.5000\n\
             \tMain.a\t1.0000\n\
             \t\tMain.a.x\t0.2500\n\
             \t\tMain.a.y\t0.1250\n\
             \tMain.b\t0.0120\n"
        );
    }

    #[test]
    fn test_render_with_starting_indent() {
        let node = frozen("Main", 0);
        let mut out = String::new();
        node.render(&mut out, 2).unwrap();
        assert_eq!(out, "\t\tMain\t0.0000\n");
    }
}
