//! Lenient SVG path-data reader. Malformed pieces are logged and skipped;
//! parsing never fails.

use std::sync::OnceLock;

use regex::Regex;

use crate::geometry::limits::{MAX_SVG_LEN, MAX_SVG_SEGMENTS};
use crate::geometry::math::reflect;
use crate::model::Point;
use crate::segment::{Segment, SegmentKind};
use crate::segments::arc::EllipticalArc;
use crate::segments::cubic::CubicCurve;
use crate::segments::line::Line;
use crate::segments::quadratic::QuadraticCurve;

fn command_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)[a-df-z][^a-df-z]*").unwrap())
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap())
}

/// Control point of the previous segment, for `S`/`T` reflection.
#[derive(Clone, Copy)]
enum LastControl {
    Cubic(Point),
    Quadratic(Point),
}

struct Parser {
    segments: Vec<Segment>,
    current: Point,
    subpath_start: Point,
    last_control: Option<LastControl>,
}

impl Parser {
    fn push(&mut self, kind: impl Into<SegmentKind>, last_control: Option<LastControl>) {
        let segment = Segment::new(kind);
        self.current = segment.end_point();
        self.last_control = last_control;
        self.segments.push(segment);
    }

    fn full(&self) -> bool {
        self.segments.len() >= MAX_SVG_SEGMENTS
    }

    /// Apply one argument group of `cmd` (upper case) at the current point.
    fn apply(&mut self, cmd: char, relative: bool, args: &[f64]) {
        let cur = self.current;
        let at = |x: f64, y: f64| {
            if relative {
                Point::new(cur.x + x, cur.y + y)
            } else {
                Point::new(x, y)
            }
        };
        match cmd {
            'M' => {
                self.current = at(args[0], args[1]);
                self.subpath_start = self.current;
                self.last_control = None;
            }
            'L' => self.push(Line::new(cur, at(args[0], args[1])), None),
            'H' => {
                let x = if relative { cur.x + args[0] } else { args[0] };
                self.push(Line::new(cur, Point::new(x, cur.y)), None);
            }
            'V' => {
                let y = if relative { cur.y + args[0] } else { args[0] };
                self.push(Line::new(cur, Point::new(cur.x, y)), None);
            }
            'C' => {
                let c1 = at(args[0], args[1]);
                let c2 = at(args[2], args[3]);
                let end = at(args[4], args[5]);
                self.push(CubicCurve::new(cur, c1, c2, end), Some(LastControl::Cubic(c2)));
            }
            'S' => {
                let c1 = match self.last_control {
                    Some(LastControl::Cubic(c)) => reflect(c, cur),
                    _ => cur,
                };
                let c2 = at(args[0], args[1]);
                let end = at(args[2], args[3]);
                self.push(CubicCurve::new(cur, c1, c2, end), Some(LastControl::Cubic(c2)));
            }
            'Q' => {
                let c = at(args[0], args[1]);
                let end = at(args[2], args[3]);
                self.push(QuadraticCurve::new(cur, c, end), Some(LastControl::Quadratic(c)));
            }
            'T' => {
                let c = match self.last_control {
                    Some(LastControl::Quadratic(c)) => reflect(c, cur),
                    _ => cur,
                };
                let end = at(args[0], args[1]);
                self.push(QuadraticCurve::new(cur, c, end), Some(LastControl::Quadratic(c)));
            }
            'A' => {
                let (rx, ry, rotation) = (args[0], args[1], args[2]);
                let end = at(args[5], args[6]);
                if end == cur {
                    self.last_control = None;
                } else if rx == 0.0 || ry == 0.0 {
                    self.push(Line::new(cur, end), None);
                } else {
                    let arc = EllipticalArc::new(cur, rx, ry, rotation, args[3] != 0.0, args[4] != 0.0, end);
                    self.push(arc, None);
                }
            }
            _ => {}
        }
    }

    fn close(&mut self) {
        if self.current != self.subpath_start {
            self.push(Line::new(self.current, self.subpath_start), None);
        }
        self.current = self.subpath_start;
        self.last_control = None;
    }
}

fn arity(cmd: char) -> Option<usize> {
    match cmd {
        'M' | 'L' | 'T' => Some(2),
        'H' | 'V' => Some(1),
        'C' => Some(6),
        'S' | 'Q' => Some(4),
        'A' => Some(7),
        'Z' => Some(0),
        _ => None,
    }
}

/// Parse SVG path data into segments. Supports `M L H V C S Q T A Z` in
/// absolute and relative forms, with implicit repeats.
pub fn parse_svg(d: &str) -> Vec<Segment> {
    if d.len() > MAX_SVG_LEN {
        tracing::warn!(len = d.len(), limit = MAX_SVG_LEN, "SVG path data too long, ignoring");
        return Vec::new();
    }
    let mut parser = Parser {
        segments: Vec::new(),
        current: Point::default(),
        subpath_start: Point::default(),
        last_control: None,
    };

    for token in command_re().find_iter(d) {
        let text = token.as_str();
        let Some(letter) = text.chars().next() else {
            continue;
        };
        let cmd = letter.to_ascii_uppercase();
        let relative = letter.is_ascii_lowercase();
        let Some(size) = arity(cmd) else {
            tracing::warn!(command = %letter, "unsupported SVG path command");
            continue;
        };
        if cmd == 'Z' {
            parser.close();
            continue;
        }

        let args: Vec<f64> = number_re()
            .find_iter(&text[letter.len_utf8()..])
            .filter_map(|m| m.as_str().parse().ok())
            .collect();
        if args.len() < size || args.len() % size != 0 {
            tracing::warn!(
                command = %letter,
                got = args.len(),
                expected = size,
                "incomplete SVG argument group"
            );
        }
        for (i, group) in args.chunks_exact(size).enumerate() {
            if parser.full() {
                tracing::warn!(limit = MAX_SVG_SEGMENTS, "SVG segment limit reached, truncating");
                return parser.segments;
            }
            // Extra pairs after a moveto are linetos
            let cmd = if cmd == 'M' && i > 0 { 'L' } else { cmd };
            parser.apply(cmd, relative, group);
        }
    }
    parser.segments
}
