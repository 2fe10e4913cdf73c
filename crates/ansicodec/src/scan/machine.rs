// State Machine States, Actions, and Transitions

/// The current state when processing control sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum State {
    Ground,
    Escape,
    EscapeIntermediate,
    SingleShift,
    Csi,
    Osc,
    OscEnd,
    StringFunction,
    StringFunctionEnd,
}

impl State {
    /// Determine whether this state buffers an operating system command.
    pub const fn is_osc(&self) -> bool {
        matches!(*self, Self::Osc | Self::OscEnd)
    }
}

/// The next action to take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Action {
    /// Add the character to the current text span.
    Print,
    /// Flush the text span and emit a control token.
    EmitControl,
    /// Flush the text span and start a new escape sequence.
    StartSequence,
    /// Retain the character as part of the raw sequence.
    RetainChar,
    /// Retain the character as a control sequence parameter or private
    /// marker.
    RetainParam,
    /// Retain the character as an intermediate.
    RetainIntermediate,
    /// Retain the character and surface the sequence as malformed.
    Abort,
    /// Retain the character and dispatch an escape sequence.
    DispatchEscape,
    /// Retain the character and dispatch a single shift.
    DispatchSingleShift,
    /// Retain the character and dispatch a control sequence.
    DispatchCsi,
    /// Retain the character and dispatch an operating system command.
    DispatchOsc,
    /// Retain the character and dispatch a string function, which is never
    /// decoded.
    DispatchString,
}

impl Action {
    /// Determine whether this action dispatches a sequence.
    pub const fn is_dispatch(&self) -> bool {
        use self::Action::*;

        matches!(
            *self,
            Abort
                | DispatchEscape
                | DispatchSingleShift
                | DispatchCsi
                | DispatchOsc
                | DispatchString
        )
    }
}

// ------------------------------------------------------------------------------------------------

const fn ground(c: char) -> (State, Action) {
    use self::Action::*;
    use self::State::*;

    match c {
        '\x1b' => (Escape, StartSequence),
        '\u{9b}' => (Csi, StartSequence),
        '\u{9d}' => (Osc, StartSequence),
        '\u{90}' | '\u{9e}' | '\u{9f}' => (StringFunction, StartSequence),
        '\x07' | '\t' | '\n' | '\r' => (Ground, EmitControl),
        _ => (Ground, Print),
    }
}

const fn escape(c: char) -> (State, Action) {
    use self::Action::*;
    use self::State::*;

    match c {
        '[' => (Csi, RetainChar),
        ']' => (Osc, RetainChar),
        'O' => (SingleShift, RetainChar),
        'P' | 'X' | '^' | '_' => (StringFunction, RetainChar),
        ' '..='/' => (EscapeIntermediate, RetainIntermediate),
        '0'..='~' => (Ground, DispatchEscape),
        _ => (Ground, Abort),
    }
}

const fn escape_intermediate(c: char) -> (State, Action) {
    use self::Action::*;
    use self::State::*;

    match c {
        ' '..='/' => (EscapeIntermediate, RetainIntermediate),
        '0'..='~' => (Ground, DispatchEscape),
        _ => (Ground, Abort),
    }
}

const fn single_shift(c: char) -> (State, Action) {
    use self::Action::*;
    use self::State::*;

    match c {
        ' '..='~' => (Ground, DispatchSingleShift),
        _ => (Ground, Abort),
    }
}

const fn csi(c: char) -> (State, Action) {
    use self::Action::*;
    use self::State::*;

    match c {
        '0'..='?' => (Csi, RetainParam),
        ' '..='/' => (Csi, RetainIntermediate),
        '@'..='~' => (Ground, DispatchCsi),
        _ => (Ground, Abort),
    }
}

const fn osc(c: char) -> (State, Action) {
    use self::Action::*;
    use self::State::*;

    match c {
        '\x07' | '\u{9c}' => (Ground, DispatchOsc),
        '\x1b' => (OscEnd, RetainChar),
        _ => (Osc, RetainChar),
    }
}

const fn osc_end(c: char) -> (State, Action) {
    use self::Action::*;
    use self::State::*;

    match c {
        '\\' | '\u{9c}' => (Ground, DispatchOsc),
        _ => (Osc, RetainChar),
    }
}

const fn string_function(c: char) -> (State, Action) {
    use self::Action::*;
    use self::State::*;

    match c {
        '\u{9c}' => (Ground, DispatchString),
        '\x1b' => (StringFunctionEnd, RetainChar),
        _ => (StringFunction, RetainChar),
    }
}

const fn string_function_end(c: char) -> (State, Action) {
    use self::Action::*;
    use self::State::*;

    match c {
        '\\' | '\u{9c}' => (Ground, DispatchString),
        _ => (StringFunction, RetainChar),
    }
}

// ------------------------------------------------------------------------------------------------
// Complete transition function

/// Determine the next state and action.
pub(super) const fn transition(state: State, c: char) -> (State, Action) {
    use self::State::*;

    match state {
        Ground => ground(c),
        Escape => escape(c),
        EscapeIntermediate => escape_intermediate(c),
        SingleShift => single_shift(c),
        Csi => csi(c),
        Osc => osc(c),
        OscEnd => osc_end(c),
        StringFunction => string_function(c),
        StringFunctionEnd => string_function_end(c),
    }
}
