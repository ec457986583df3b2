// Copyright 2026 the pathplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replaying elements onto a drawing surface.

use std::borrow::Borrow;

use crate::{Command, CubicTo, PathDataError, Point, QuadTo, SmoothCubicTo};

/// Something that can be drawn on with absolute coordinates.
///
/// These are the only operations the replay engine issues: every relative,
/// horizontal, vertical and smooth element is resolved to one of them first.
pub trait DrawSurface {
    /// Start a new subpath at `p`.
    fn move_to(&mut self, p: Point);

    /// Draw a line to `p`.
    fn line_to(&mut self, p: Point);

    /// Draw a quadratic Bézier curve to `p`.
    fn quad_to(&mut self, ctrl: Point, p: Point);

    /// Draw a cubic Bézier curve to `p`.
    fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, p: Point);

    /// Close the current subpath.
    fn close_path(&mut self);
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn move_to(&mut self, p: Point) {
        (**self).move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        (**self).line_to(p);
    }

    fn quad_to(&mut self, ctrl: Point, p: Point) {
        (**self).quad_to(ctrl, p);
    }

    fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, p: Point) {
        (**self).curve_to(ctrl1, ctrl2, p);
    }

    fn close_path(&mut self) {
        (**self).close_path();
    }
}

/// What to do when playback meets an error element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Report the element and carry on with the next one.
    #[default]
    Skip,
    /// Report the element and stop, returning its error.
    Abort,
}

/// Options for a [`Replay`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayOptions {
    /// How error elements are handled.
    pub on_error: ErrorPolicy,
    /// Whether an arc's endpoint becomes the current point.
    ///
    /// Arcs are never drawn. With this set (the default), the elements after an
    /// arc continue from where the arc would have ended; without it they
    /// continue from where the arc started.
    pub arcs_advance: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        ReplayOptions {
            on_error: ErrorPolicy::Skip,
            arcs_advance: true,
        }
    }
}

impl ReplayOptions {
    /// Builder method for setting the error policy.
    pub fn with_on_error(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    /// Builder method for setting whether arcs move the current point.
    pub fn with_arcs_advance(mut self, arcs_advance: bool) -> Self {
        self.arcs_advance = arcs_advance;
        self
    }
}

/// The position and curve memory carried from one element to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReplayState {
    /// Where the last element ended.
    pub current: Point,
    /// Where the current subpath started; close-path returns here.
    pub subpath_start: Point,
    /// The second control point of the previous element, in absolute
    /// coordinates, if it was a cubic Bézier.
    pub last_cubic: Option<Point>,
    /// The control point of the previous element, in absolute coordinates, if it
    /// was a quadratic Bézier.
    pub last_quad: Option<Point>,
}

impl ReplayState {
    fn reset_prev_beziers(&mut self) {
        self.last_cubic = None;
        self.last_quad = None;
    }

    /// The implied first control point of a smooth cubic.
    fn smooth_cubic_ctrl1(&self) -> Point {
        match self.last_cubic {
            Some(ctrl2) => self.current.reflect(ctrl2),
            None => self.current,
        }
    }

    /// The implied control point of a smooth quadratic.
    fn smooth_quad_ctrl(&self) -> Point {
        match self.last_quad {
            Some(ctrl) => self.current.reflect(ctrl),
            None => self.current,
        }
    }

    fn resolve(&self, p: Point) -> Point {
        self.current + p.to_vec2()
    }
}

/// A summary of one playback run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Playback {
    /// How many drawing operations were issued.
    pub drawn: usize,
    /// How many error elements were reported and skipped.
    pub skipped: usize,
    /// How many arcs were passed over without drawing.
    pub arcs: usize,
}

/// The replay engine.
///
/// A `Replay` turns elements into calls on a [`DrawSurface`], resolving relative
/// coordinates and smooth-curve control points as it goes. State is kept across
/// calls to [`play`](Replay::play), so a long stream can be replayed in pieces;
/// call [`reset`](Replay::reset) to start over.
#[derive(Clone, Debug, Default)]
pub struct Replay {
    options: ReplayOptions,
    state: ReplayState,
}

impl Replay {
    /// Create a replay engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a replay engine with the given options.
    pub fn with_options(options: ReplayOptions) -> Self {
        Replay {
            options,
            state: ReplayState::default(),
        }
    }

    /// The state after the last element played.
    pub fn state(&self) -> ReplayState {
        self.state
    }

    /// Forget all state, as if nothing had been played.
    pub fn reset(&mut self) {
        self.state = ReplayState::default();
    }

    /// Replay `commands` onto `surface`, logging error elements.
    ///
    /// Playback stops at [`Command::EndOfStream`] or when `commands` runs out.
    ///
    /// # Errors
    ///
    /// With [`ErrorPolicy::Abort`], returns the error of the first error
    /// element. Nothing is returned as an error under [`ErrorPolicy::Skip`].
    pub fn play<I, S>(&mut self, commands: I, surface: &mut S) -> Result<Playback, PathDataError>
    where
        I: IntoIterator,
        I::Item: Borrow<Command>,
        S: DrawSurface + ?Sized,
    {
        self.play_with(commands, surface, |command, cause| {
            log::warn!("error element {command:?}: {cause}");
        })
    }

    /// Replay `commands` onto `surface`, passing each error element and its
    /// cause to `on_error` before applying the error policy.
    ///
    /// # Errors
    ///
    /// See [`play`](Replay::play).
    pub fn play_with<I, S, F>(
        &mut self,
        commands: I,
        surface: &mut S,
        mut on_error: F,
    ) -> Result<Playback, PathDataError>
    where
        I: IntoIterator,
        I::Item: Borrow<Command>,
        S: DrawSurface + ?Sized,
        F: FnMut(&Command, &PathDataError),
    {
        let mut playback = Playback::default();
        for command in commands {
            let command = command.borrow();
            if let Some(cause) = command.cause() {
                on_error(command, &cause);
                match self.options.on_error {
                    ErrorPolicy::Skip => playback.skipped += 1,
                    ErrorPolicy::Abort => return Err(cause),
                }
                continue;
            }
            if *command == Command::EndOfStream {
                break;
            }
            if self.apply(command, surface) {
                playback.drawn += 1;
            } else {
                playback.arcs += 1;
            }
        }
        Ok(playback)
    }

    /// Apply one drawable element, returning whether a surface call was made.
    fn apply<S: DrawSurface + ?Sized>(&mut self, command: &Command, surface: &mut S) -> bool {
        let state = &mut self.state;
        match *command {
            Command::ClosePath => {
                surface.close_path();
                state.current = state.subpath_start;
                state.reset_prev_beziers();
            }
            Command::MoveTo(p) | Command::MoveToRel(p) => {
                let p = if matches!(command, Command::MoveToRel(_)) {
                    state.resolve(p)
                } else {
                    p
                };
                surface.move_to(p);
                state.current = p;
                state.subpath_start = p;
                state.reset_prev_beziers();
            }
            Command::LineTo(p) => line_to(state, surface, p),
            Command::LineToRel(p) => {
                let p = state.resolve(p);
                line_to(state, surface, p);
            }
            Command::Horiz(x) => {
                let p = state.current.with_x(x);
                line_to(state, surface, p);
            }
            Command::HorizRel(dx) => {
                let p = state.current.with_x(state.current.x + dx);
                line_to(state, surface, p);
            }
            Command::Vert(y) => {
                let p = state.current.with_y(y);
                line_to(state, surface, p);
            }
            Command::VertRel(dy) => {
                let p = state.current.with_y(state.current.y + dy);
                line_to(state, surface, p);
            }
            Command::CubicTo(CubicTo { ctrl1, ctrl2, to }) => {
                curve_to(state, surface, ctrl1, ctrl2, to);
            }
            Command::CubicToRel(CubicTo { ctrl1, ctrl2, to }) => {
                let ctrl1 = state.resolve(ctrl1);
                let ctrl2 = state.resolve(ctrl2);
                let to = state.resolve(to);
                curve_to(state, surface, ctrl1, ctrl2, to);
            }
            Command::SmoothCubicTo(SmoothCubicTo { ctrl2, to }) => {
                let ctrl1 = state.smooth_cubic_ctrl1();
                curve_to(state, surface, ctrl1, ctrl2, to);
            }
            Command::SmoothCubicToRel(SmoothCubicTo { ctrl2, to }) => {
                let ctrl1 = state.smooth_cubic_ctrl1();
                let (ctrl2, to) = (state.resolve(ctrl2), state.resolve(to));
                curve_to(state, surface, ctrl1, ctrl2, to);
            }
            Command::QuadTo(QuadTo { ctrl, to }) => quad_to(state, surface, ctrl, to),
            Command::QuadToRel(QuadTo { ctrl, to }) => {
                let (ctrl, to) = (state.resolve(ctrl), state.resolve(to));
                quad_to(state, surface, ctrl, to);
            }
            Command::SmoothQuadTo(to) => {
                let ctrl = state.smooth_quad_ctrl();
                quad_to(state, surface, ctrl, to);
            }
            Command::SmoothQuadToRel(to) => {
                let ctrl = state.smooth_quad_ctrl();
                let to = state.resolve(to);
                quad_to(state, surface, ctrl, to);
            }
            Command::EllipticArc(arc) | Command::EllipticArcRel(arc) => {
                if self.options.arcs_advance {
                    state.current = if matches!(command, Command::EllipticArcRel(_)) {
                        state.resolve(arc.to)
                    } else {
                        arc.to
                    };
                }
                state.reset_prev_beziers();
                return false;
            }
            // Filtered out by the caller.
            Command::UnknownCommand(_) | Command::DecodeError { .. } | Command::EndOfStream => {
                return false;
            }
        }
        true
    }
}

fn line_to<S: DrawSurface + ?Sized>(state: &mut ReplayState, surface: &mut S, p: Point) {
    surface.line_to(p);
    state.current = p;
    state.reset_prev_beziers();
}

fn curve_to<S: DrawSurface + ?Sized>(
    state: &mut ReplayState,
    surface: &mut S,
    ctrl1: Point,
    ctrl2: Point,
    to: Point,
) {
    surface.curve_to(ctrl1, ctrl2, to);
    state.current = to;
    state.last_quad = None;
    state.last_cubic = Some(ctrl2);
}

fn quad_to<S: DrawSurface + ?Sized>(
    state: &mut ReplayState,
    surface: &mut S,
    ctrl: Point,
    to: Point,
) {
    surface.quad_to(ctrl, to);
    state.current = to;
    state.last_cubic = None;
    state.last_quad = Some(ctrl);
}

/// Replay `commands` onto `surface` with a fresh engine and default options.
///
/// ```
/// use pathplay::{play, BezPath, PathData};
/// let data: PathData = "m1,1 l2,2".parse().unwrap();
/// let mut path = BezPath::new();
/// play(&data, &mut path).unwrap();
/// assert_eq!(path.to_svg(), "M1,1 L3,3");
/// ```
///
/// # Errors
///
/// Never fails under the default [`ErrorPolicy::Skip`]; the `Result` mirrors
/// [`Replay::play`].
pub fn play<I, S>(commands: I, surface: &mut S) -> Result<Playback, PathDataError>
where
    I: IntoIterator,
    I::Item: Borrow<Command>,
    S: DrawSurface + ?Sized,
{
    Replay::new().play(commands, surface)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{ArcTo, GroupShape, Tokenizer, Vec2};

    /// A surface that remembers every call.
    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Call {
        Move(Point),
        Line(Point),
        Quad(Point, Point),
        Curve(Point, Point, Point),
        Close,
    }

    impl DrawSurface for Recorder {
        fn move_to(&mut self, p: Point) {
            self.calls.push(Call::Move(p));
        }

        fn line_to(&mut self, p: Point) {
            self.calls.push(Call::Line(p));
        }

        fn quad_to(&mut self, ctrl: Point, p: Point) {
            self.calls.push(Call::Quad(ctrl, p));
        }

        fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, p: Point) {
            self.calls.push(Call::Curve(ctrl1, ctrl2, p));
        }

        fn close_path(&mut self) {
            self.calls.push(Call::Close);
        }
    }

    fn record(text: &str) -> Vec<Call> {
        let mut recorder = Recorder::default();
        play(Tokenizer::new(text.as_bytes()), &mut recorder).unwrap();
        recorder.calls
    }

    fn pt(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
        assert_eq!(
            record("M0,0 C 0,0 10,0 10,10 S 20,20 20,0"),
            [
                Call::Move(pt(0., 0.)),
                Call::Curve(pt(0., 0.), pt(10., 0.), pt(10., 10.)),
                Call::Curve(pt(10., 20.), pt(20., 20.), pt(20., 0.)),
            ]
        );
    }

    #[test]
    fn smooth_curves_default_to_current_point() {
        assert_eq!(
            record("M5,5 S 20,20 20,0"),
            [
                Call::Move(pt(5., 5.)),
                Call::Curve(pt(5., 5.), pt(20., 20.), pt(20., 0.)),
            ]
        );
        // A quadratic in between breaks the cubic chain.
        assert_eq!(
            record("M0,0 C0,0 1,1 2,2 Q3,3 4,4 S5,5 6,6")[3],
            Call::Curve(pt(4., 4.), pt(5., 5.), pt(6., 6.))
        );
        assert_eq!(
            record("M1,1 T 4,4"),
            [Call::Move(pt(1., 1.)), Call::Quad(pt(1., 1.), pt(4., 4.))]
        );
    }

    #[test]
    fn smooth_quads_chain() {
        assert_eq!(
            record("M0,0 Q 5,5 10,0 T 20,0 T 30,0"),
            [
                Call::Move(pt(0., 0.)),
                Call::Quad(pt(5., 5.), pt(10., 0.)),
                Call::Quad(pt(15., -5.), pt(20., 0.)),
                Call::Quad(pt(25., 5.), pt(30., 0.)),
            ]
        );
        assert_eq!(
            record("M0,0 q 5,5 10,0 t 10,0"),
            [
                Call::Move(pt(0., 0.)),
                Call::Quad(pt(5., 5.), pt(10., 0.)),
                Call::Quad(pt(15., -5.), pt(20., 0.)),
            ]
        );
    }

    #[test]
    fn relative_resolution_is_cumulative() {
        assert_eq!(
            record("m 1,1 l 2,2"),
            [Call::Move(pt(1., 1.)), Call::Line(pt(3., 3.))]
        );
        assert_eq!(
            record("M10,10 h5 v-5 H0 V0 l1,1 1,1"),
            [
                Call::Move(pt(10., 10.)),
                Call::Line(pt(15., 10.)),
                Call::Line(pt(15., 5.)),
                Call::Line(pt(0., 5.)),
                Call::Line(pt(0., 0.)),
                Call::Line(pt(1., 1.)),
                Call::Line(pt(2., 2.)),
            ]
        );
        assert_eq!(
            record("M1,1 c1,0 2,1 3,3 s1,1 2,0"),
            [
                Call::Move(pt(1., 1.)),
                Call::Curve(pt(2., 1.), pt(3., 2.), pt(4., 4.)),
                Call::Curve(pt(5., 6.), pt(5., 5.), pt(6., 4.)),
            ]
        );
    }

    #[test]
    fn move_repeats_stay_moves() {
        assert_eq!(
            record("m1,1 1,1"),
            [Call::Move(pt(1., 1.)), Call::Move(pt(2., 2.))]
        );
    }

    #[test]
    fn close_returns_to_subpath_start() {
        let mut replay = Replay::new();
        let mut recorder = Recorder::default();
        let data = [
            Command::MoveTo(pt(1., 1.)),
            Command::LineTo(pt(5., 1.)),
            Command::ClosePath,
            Command::LineToRel(pt(1., 0.)),
        ];
        replay.play(&data, &mut recorder).unwrap();
        assert_eq!(recorder.calls[3], Call::Line(pt(2., 1.)));
        assert_eq!(replay.state().subpath_start, pt(1., 1.));
        assert_eq!(replay.state().current, pt(2., 1.));
    }

    #[test]
    fn arcs_draw_nothing() {
        let arc = Command::EllipticArcRel(ArcTo {
            radii: Vec2::new(5., 5.),
            x_rotation: 0.,
            large_arc: false,
            sweep: true,
            to: pt(10., 0.),
        });
        let data = [
            Command::MoveTo(pt(1., 1.)),
            Command::CubicTo(CubicTo {
                ctrl1: pt(1., 1.),
                ctrl2: pt(2., 2.),
                to: pt(3., 3.),
            }),
            arc,
            Command::LineToRel(pt(1., 1.)),
        ];

        let mut recorder = Recorder::default();
        let mut replay = Replay::new();
        let playback = replay.play(&data, &mut recorder).unwrap();
        assert_eq!(
            playback,
            Playback {
                drawn: 3,
                skipped: 0,
                arcs: 1
            }
        );
        assert_eq!(recorder.calls[2], Call::Line(pt(14., 4.)));
        assert_eq!(replay.state().last_cubic, None);

        let mut recorder = Recorder::default();
        let options = ReplayOptions::default().with_arcs_advance(false);
        Replay::with_options(options)
            .play(&data, &mut recorder)
            .unwrap();
        assert_eq!(recorder.calls[2], Call::Line(pt(4., 4.)));
    }

    #[test]
    fn errors_are_reported_and_skipped() {
        let mut recorder = Recorder::default();
        let mut reported = Vec::new();
        let playback = Replay::new()
            .play_with(
                Tokenizer::new(&b"M0,0 L1,1 C 0,0 1,1 L2,2"[..]),
                &mut recorder,
                |command, cause| reported.push((command.to_string(), cause.clone())),
            )
            .unwrap();
        assert_eq!(playback.drawn, 3);
        assert_eq!(playback.skipped, 1);
        assert_eq!(
            reported,
            [(
                "C 0,0 1,1 ".to_string(),
                PathDataError::Arity {
                    command: 'C',
                    shape: GroupShape::Vectors(3),
                    found: 4,
                }
            )]
        );
        assert_eq!(recorder.calls[2], Call::Line(pt(2., 2.)));
    }

    #[test]
    fn abort_stops_at_first_error() {
        let mut recorder = Recorder::default();
        let options = ReplayOptions::default().with_on_error(ErrorPolicy::Abort);
        let result = Replay::with_options(options)
            .play(Tokenizer::new(&b"X 1,2 M0,0"[..]), &mut recorder);
        assert_eq!(result, Err(PathDataError::UnknownCommand('X')));
        assert!(recorder.calls.is_empty());
    }

    /// Collects warnings from every test thread.
    struct Capture;

    static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());
    static CAPTURE: Capture = Capture;

    impl log::Log for Capture {
        fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &log::Record<'_>) {
            if self.enabled(record.metadata()) {
                CAPTURED.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    #[test]
    fn default_hook_message_holds_under_both_policies() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Warn);

        let mut recorder = Recorder::default();
        let options = ReplayOptions::default().with_on_error(ErrorPolicy::Abort);
        let result = Replay::with_options(options)
            .play(Tokenizer::new(&b"M0,0 L 7,,9 L1,1"[..]), &mut recorder);
        assert!(result.is_err());
        play(Tokenizer::new(&b"M0,0 L 8,,9 L1,1"[..]), &mut recorder).unwrap();

        let captured = CAPTURED.lock().unwrap();
        for raw in ["7,,9", "8,,9"] {
            let line = captured.iter().find(|line| line.contains(raw)).unwrap();
            assert!(line.starts_with("error element DecodeError"), "{line}");
            assert!(!line.contains("skipping"), "{line}");
        }
    }

    #[test]
    fn unknown_command_draws_nothing() {
        assert!(record("X 1,2").is_empty());
    }

    #[test]
    fn stops_at_end_of_stream() {
        let mut recorder = Recorder::default();
        let data = [
            Command::MoveTo(pt(0., 0.)),
            Command::EndOfStream,
            Command::LineTo(pt(1., 1.)),
        ];
        let playback = play(&data, &mut recorder).unwrap();
        assert_eq!(playback.drawn, 1);
        assert_eq!(recorder.calls, [Call::Move(pt(0., 0.))]);
    }

    #[test]
    fn drawing_calls_follow_element_order() {
        let text = "M0,0 L1,0 H2 V2 Q3,3 4,4 T5,5 C6,6 7,7 8,8 S9,9 10,10 Z";
        let drawable: Vec<_> = Tokenizer::new(text.as_bytes()).collect();
        let calls = record(text);
        assert_eq!(calls.len(), drawable.len());
        for (command, call) in drawable.iter().zip(&calls) {
            let matches = match command {
                Command::MoveTo(_) => matches!(call, Call::Move(_)),
                Command::LineTo(_) | Command::Horiz(_) | Command::Vert(_) => {
                    matches!(call, Call::Line(_))
                }
                Command::QuadTo(_) | Command::SmoothQuadTo(_) => matches!(call, Call::Quad(..)),
                Command::CubicTo(_) | Command::SmoothCubicTo(_) => {
                    matches!(call, Call::Curve(..))
                }
                Command::ClosePath => matches!(call, Call::Close),
                _ => false,
            };
            assert!(matches, "{command:?} drew {call:?}");
        }
    }

    #[test]
    fn state_persists_until_reset() {
        let mut replay = Replay::new();
        let mut recorder = Recorder::default();
        replay
            .play(&[Command::MoveTo(pt(3., 4.))], &mut recorder)
            .unwrap();
        replay
            .play(&[Command::LineToRel(pt(1., 1.))], &mut recorder)
            .unwrap();
        assert_eq!(recorder.calls[1], Call::Line(pt(4., 5.)));
        replay.reset();
        assert_eq!(replay.state(), ReplayState::default());
    }
}
