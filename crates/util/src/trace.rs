/// One step of a randomized operation trace over an ordered map of
/// `i64 -> i64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceOp {
    Put(i64, i64),
    Remove(i64),
    Get(i64),
    PollFirst,
    PollLast,
}

impl TraceOp {
    /// Key the operation addresses, if any.
    pub fn key(&self) -> Option<i64> {
        match *self {
            TraceOp::Put(k, _) | TraceOp::Remove(k) | TraceOp::Get(k) => Some(k),
            TraceOp::PollFirst | TraceOp::PollLast => None,
        }
    }
}
