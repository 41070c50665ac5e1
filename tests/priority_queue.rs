use pretty_assertions::assert_eq;
use proptest::prelude::*;
use wabi_toolkit::{Error, PriorityQueue};

#[derive(Debug, Clone)]
enum QueueOp {
    Push(u8),
    PopMin,
    PopMax,
}

fn queue_op_strategy() -> impl Strategy<Value = QueueOp> {
    prop_oneof![
        4 => (0u8..16).prop_map(QueueOp::Push),
        1 => Just(QueueOp::PopMin),
        1 => Just(QueueOp::PopMax),
    ]
}

#[test]
fn serves_both_ends() {
    let mut queue = PriorityQueue::new();
    for (job, priority) in [("backup", 3), ("deploy", 7), ("lint", 1), ("page", 9), ("docs", 1)] {
        queue.push(job, priority);
    }

    assert_eq!(queue.peek_min(), Ok((&"lint", &1)));
    assert_eq!(queue.peek_max(), Ok((&"page", &9)));
    assert_eq!(queue.pop_max(), Ok(("page", 9)));
    assert_eq!(queue.pop_min(), Ok(("lint", 1)));
    assert_eq!(queue.pop_min(), Ok(("docs", 1)));
    assert_eq!(queue.len(), 2);

    queue.clear();
    assert!(queue.is_empty());
    assert_eq!(queue.pop_max(), Err(Error::EmptyCollection));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Pops agree with a sorted vector of `(priority, push order)` pairs.
    #[test]
    fn pops_match_sorted_model(ops in proptest::collection::vec(queue_op_strategy(), 0..1_000)) {
        let mut queue = PriorityQueue::new();
        let mut model: Vec<(u8, usize)> = Vec::new();

        for (pushed, op) in ops.into_iter().enumerate() {
            match op {
                QueueOp::Push(priority) => {
                    queue.push(pushed, priority);
                    let at = model.partition_point(|entry| *entry <= (priority, pushed));
                    model.insert(at, (priority, pushed));
                }
                QueueOp::PopMin => {
                    let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                    prop_assert_eq!(queue.pop_min().ok(), expected.map(|(p, item)| (item, p)));
                }
                QueueOp::PopMax => {
                    let expected = model.pop();
                    prop_assert_eq!(queue.pop_max().ok(), expected.map(|(p, item)| (item, p)));
                }
            }
            prop_assert_eq!(queue.len(), model.len());
        }

        for priority in 0u8..17 {
            prop_assert_eq!(queue.count_below(&priority), model.iter().filter(|(p, _)| *p < priority).count());
            prop_assert_eq!(queue.count_above(&priority), model.iter().filter(|(p, _)| *p > priority).count());
        }

        let order: Vec<(usize, u8)> = queue.iter().map(|(&item, &p)| (item, p)).collect();
        let expected: Vec<(usize, u8)> = model.iter().map(|&(p, item)| (item, p)).collect();
        prop_assert_eq!(order, expected);
    }
}
