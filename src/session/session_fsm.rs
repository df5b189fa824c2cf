use std::fmt;

use rust_fsm::state_machine;

/*
 * Loading
 *    A fetch is in flight (or just failed and the next attempt is starting)
 * Ready
 *    An alias is displayed, a guess can be submitted
 *    A correct guess or an explicit refresh goes back to Loading
 */
state_machine! {
    derive(Debug, Clone, PartialEq)
    pub SessionFsm(Loading)

    Loading => {
        RoundReady => Ready,
        FetchFailed => Loading,
        RequestRound => Loading,
    },
    Ready => {
        RequestRound => Loading,
    }
}

impl fmt::Display for SessionFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
