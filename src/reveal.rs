// reveal.rs - Scroll-triggered line reveals
//
// Each heading is split into lines and the lines tween in from below
// with a slight skew once the heading reaches the trigger band. Splitting,
// tweening and triggering belong to the tween library; this module only
// decides what to ask for.

use crate::config::RevealConfig;
use crate::error::EngineError;

/// Tween library seam
pub trait TweenBackend {
    type Node;

    /// Split `node` by `split_type` ("lines", "chars,words,lines", ...) and
    /// return the line wrappers, which carry `class`
    fn split_lines(&mut self, node: &Self::Node, split_type: &str, class: &str) -> Result<Vec<Self::Node>, EngineError>;

    /// Tween `targets` from the offset state to rest, triggered by `trigger`
    fn tween_from(&mut self, targets: &[Self::Node], trigger: &Self::Node, cfg: &RevealConfig) -> Result<(), EngineError>;
}

/// Register one reveal per heading, returns the number registered
pub fn register_reveals<B: TweenBackend>(
    backend: &mut B,
    headings: &[B::Node],
    cfg: &RevealConfig,
) -> Result<usize, EngineError> {
    if !cfg.enabled {
        return Ok(0);
    }

    let mut n = 0;
    for heading in headings {
        let lines = backend.split_lines(heading, &cfg.split_type, &cfg.lines_class)?;
        // Second pass wraps the animated lines in clipping parents
        backend.split_lines(heading, &cfg.parent_split_type, &cfg.parent_lines_class)?;
        backend.tween_from(&lines, heading, cfg)?;
        n += 1;
    }
    Ok(n)
}

/// Starting vertical offset, as the tween library expects it
pub fn travel(cfg: &RevealConfig) -> String {
    format!("{}%", cfg.travel_percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Op {
        // node, type, class
        Split(&'static str, String, String),
        Tween { targets: Vec<String>, trigger: &'static str, duration: f64, stagger: f64, skew: f64, travel: String },
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
        lines_per_heading: usize,
    }

    impl TweenBackend for Recorder {
        type Node = &'static str;

        fn split_lines(&mut self, node: &&'static str, split_type: &str, class: &str) -> Result<Vec<&'static str>, EngineError> {
            self.ops.push(Op::Split(*node, split_type.to_string(), class.to_string()));
            Ok(vec![*node; self.lines_per_heading])
        }

        fn tween_from(&mut self, targets: &[&'static str], trigger: &&'static str, cfg: &RevealConfig) -> Result<(), EngineError> {
            self.ops.push(Op::Tween {
                targets: targets.iter().map(|t| t.to_string()).collect(),
                trigger: *trigger,
                duration: cfg.duration,
                stagger: cfg.stagger,
                skew: cfg.skew_y,
                travel: travel(cfg),
            });
            Ok(())
        }
    }

    #[test]
    fn one_heading_one_reveal() {
        let mut rec = Recorder { lines_per_heading: 2, ..Default::default() };
        let n = register_reveals(&mut rec, &["title"], &RevealConfig::default()).unwrap();
        assert_eq!(n, 1);

        let tweens: Vec<_> = rec.ops.iter().filter(|op| matches!(op, Op::Tween { .. })).collect();
        assert_eq!(tweens.len(), 1);
        assert_eq!(*tweens[0], Op::Tween {
            targets: vec!["title".into(), "title".into()],
            trigger: "title",
            duration: 3.5,
            stagger: 0.05,
            skew: 3.0,
            travel: "100%".into(),
        });
    }

    #[test]
    fn splits_child_lines_then_parents() {
        let mut rec = Recorder { lines_per_heading: 1, ..Default::default() };
        register_reveals(&mut rec, &["a"], &RevealConfig::default()).unwrap();
        assert_eq!(rec.ops[0], Op::Split("a", "lines".into(), "split-child".into()));
        assert_eq!(rec.ops[1], Op::Split("a", "chars,words,lines".into(), "split-parent".into()));
    }

    #[test]
    fn split_types_come_from_config() {
        let mut rec = Recorder { lines_per_heading: 1, ..Default::default() };
        let cfg = RevealConfig { split_type: "words,lines".into(), parent_split_type: "lines".into(), ..Default::default() };
        register_reveals(&mut rec, &["a"], &cfg).unwrap();
        assert_eq!(rec.ops[0], Op::Split("a", "words,lines".into(), "split-child".into()));
        assert_eq!(rec.ops[1], Op::Split("a", "lines".into(), "split-parent".into()));
    }

    #[test]
    fn no_headings_no_reveals() {
        let mut rec = Recorder::default();
        assert_eq!(register_reveals(&mut rec, &[], &RevealConfig::default()).unwrap(), 0);
        assert!(rec.ops.is_empty());
    }

    #[test]
    fn disabled_skips_backend() {
        let mut rec = Recorder::default();
        let cfg = RevealConfig { enabled: false, ..Default::default() };
        assert_eq!(register_reveals(&mut rec, &["a", "b"], &cfg).unwrap(), 0);
        assert!(rec.ops.is_empty());
    }

    #[test]
    fn each_heading_triggers_itself() {
        let mut rec = Recorder { lines_per_heading: 3, ..Default::default() };
        let n = register_reveals(&mut rec, &["a", "b"], &RevealConfig::default()).unwrap();
        assert_eq!(n, 2);
        let triggers: Vec<_> = rec.ops.iter().filter_map(|op| match op {
            Op::Tween { trigger, .. } => Some(*trigger),
            _ => None,
        }).collect();
        assert_eq!(triggers, vec!["a", "b"]);
    }
}
