#[cfg(test)]
mod priority_queue_test {
    use fifo_pq::{Descending, Error, Priority, PriorityOrder, PriorityQueue};
    use proptest::prelude::*;
    use std::cmp::Ordering;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn dequeue_order() {
        let mut queue: PriorityQueue<&str> = PriorityQueue::new();
        assert!(queue.enqueue(2, "a").is_ok());
        assert!(queue.enqueue(1, "b").is_ok());
        assert!(queue.enqueue(2, "c").is_ok());

        assert_eq!(queue.dequeue(), Ok("b"));
        assert_eq!(queue.dequeue(), Ok("a"));
        assert_eq!(queue.dequeue(), Ok("c"));
        assert!(queue.is_empty());
    }

    #[test]
    fn drained_highest_priority() {
        let mut queue: PriorityQueue<&str> = PriorityQueue::new();
        assert!(queue.enqueue(0, "x").is_ok());
        assert_eq!(queue.dequeue(), Ok("x"));
        assert_eq!(queue.highest_priority(), Err(Error::Empty));
        assert_eq!(queue.peek(), Err(Error::Empty));
        assert_eq!(queue.dequeue(), Err(Error::Empty));
    }

    #[test]
    fn iteration_order() {
        let mut queue: PriorityQueue<i32> = PriorityQueue::new();
        assert!(queue.enqueue(5, 1).is_ok());
        assert!(queue.enqueue(5, 2).is_ok());
        assert!(queue.enqueue(3, 3).is_ok());
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(queue.into_iter().collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn custom_order() {
        /// Priorities close to 50 are served first.
        struct Nearest;
        impl PriorityOrder for Nearest {
            fn compare(lhs: Priority, rhs: Priority) -> Ordering {
                (lhs - 50).abs().cmp(&(rhs - 50).abs())
            }
        }

        let mut queue = PriorityQueue::with_order(Nearest);
        for p in [0, 100, 49, 51, 50, 20] {
            assert!(queue.enqueue(p, p).is_ok());
        }
        assert_eq!(queue.enqueue(-50, 0), Err(Error::NegativePriority(-50)));
        assert_eq!(queue.highest_priority(), Ok(50));
        assert!(queue.contains_priority(51));
        assert_eq!(
            queue.priorities().collect::<Vec<_>>(),
            vec![50, 49, 51, 20, 0, 100]
        );
        let mut drained = Vec::new();
        while let Ok(p) = queue.dequeue() {
            drained.push(p);
        }
        assert_eq!(drained, vec![50, 49, 51, 20, 0, 100]);
    }

    #[test]
    fn descending_scenario() {
        let mut queue: PriorityQueue<&str, Descending> = PriorityQueue::default();
        assert!(queue.enqueue(2, "a").is_ok());
        assert!(queue.enqueue(1, "b").is_ok());
        assert!(queue.enqueue(2, "c").is_ok());
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec!["a", "c", "b"]);
    }

    #[test]
    fn external_synchronization() {
        let num_threads = 4;
        let workload_size = 64;
        let queue: Arc<Mutex<PriorityQueue<(usize, usize)>>> = Arc::default();
        let handles: Vec<_> = (0..num_threads)
            .map(|thread_id| {
                let queue = queue.clone();
                thread::spawn(move || {
                    for seq in 0..workload_size {
                        let priority = Priority::try_from(seq % 3).unwrap();
                        let mut queue = queue.lock().unwrap();
                        assert!(queue.enqueue(priority, (thread_id, seq)).is_ok());
                    }
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().is_ok());
        }

        let mut queue = queue.lock().unwrap();
        assert_eq!(queue.len(), num_threads * workload_size);
        let mut last_priority = 0;
        let mut last_seq = vec![None; num_threads];
        while let Ok((priority, (thread_id, seq))) = queue.dequeue_with_priority() {
            if priority != last_priority {
                assert!(priority > last_priority);
                last_priority = priority;
                last_seq.iter_mut().for_each(|s| *s = None);
            }
            // Each producer's entries keep their relative order within a priority.
            assert!(last_seq[thread_id].map_or(true, |s| s < seq));
            last_seq[thread_id] = Some(seq);
        }
    }

    proptest! {
        #[test]
        fn fifo_within_priority(priority in 0_i64..1024, items in proptest::collection::vec(any::<u32>(), 0..64)) {
            let mut queue = PriorityQueue::new();
            for item in &items {
                prop_assert!(queue.enqueue(priority, *item).is_ok());
            }
            for item in &items {
                prop_assert_eq!(queue.dequeue(), Ok(*item));
            }
            prop_assert!(queue.is_empty());
        }

        #[test]
        fn priority_ordering(entries in proptest::collection::vec((0_i64..16, any::<u32>()), 0..128)) {
            let mut queue = PriorityQueue::new();
            for (priority, item) in &entries {
                prop_assert!(queue.enqueue(*priority, *item).is_ok());
            }

            // A stable sort by priority is the expected dequeue order.
            let mut expected = entries.clone();
            expected.sort_by_key(|(priority, _)| *priority);
            prop_assert_eq!(queue.iter().copied().collect::<Vec<_>>(), expected.iter().map(|(_, item)| *item).collect::<Vec<_>>());

            let mut drained = Vec::new();
            while let Ok(entry) = queue.dequeue_with_priority() {
                drained.push(entry);
            }
            prop_assert_eq!(drained, expected);
        }

        #[test]
        fn count(entries in proptest::collection::vec(0_i64..8, 0..64), dequeues in 0_usize..96) {
            let mut queue = PriorityQueue::new();
            for (seq, priority) in entries.iter().enumerate() {
                prop_assert!(queue.enqueue(*priority, seq).is_ok());
            }
            let mut removed = 0;
            for _ in 0..dequeues {
                if queue.dequeue().is_ok() {
                    removed += 1;
                }
            }
            prop_assert_eq!(removed, dequeues.min(entries.len()));
            prop_assert_eq!(queue.len(), entries.len() - removed);
        }

        #[test]
        fn idempotent_peek(entries in proptest::collection::vec((0_i64..8, any::<u8>()), 1..32), peeks in 1_usize..8) {
            let mut queue = PriorityQueue::new();
            for (priority, item) in &entries {
                prop_assert!(queue.enqueue(*priority, *item).is_ok());
            }
            let first = queue.peek().copied();
            for _ in 0..peeks {
                prop_assert_eq!(queue.peek().copied(), first);
                prop_assert_eq!(queue.len(), entries.len());
            }
            prop_assert_eq!(queue.dequeue(), first);
        }

        #[test]
        fn negative_priority(priority in Priority::MIN..0, filled in any::<bool>()) {
            let mut queue = PriorityQueue::new();
            if filled {
                prop_assert!(queue.enqueue(3, 'a').is_ok());
            }
            let len = queue.len();
            prop_assert_eq!(queue.enqueue(priority, 'b'), Err(Error::NegativePriority(priority)));
            prop_assert_eq!(queue.len(), len);
            prop_assert_eq!(queue.is_empty(), !filled);
            prop_assert!(!queue.contains_item(&'b'));
        }

        #[test]
        fn clear(entries in proptest::collection::vec((0_i64..8, any::<u8>()), 0..32)) {
            let mut queue = PriorityQueue::new();
            for (priority, item) in &entries {
                prop_assert!(queue.enqueue(*priority, *item).is_ok());
            }
            queue.clear();
            prop_assert!(queue.is_empty());
            prop_assert_eq!(queue.len(), 0);
            prop_assert_eq!(queue.highest_priority(), Err(Error::Empty));
            prop_assert_eq!(queue.peek(), Err(Error::Empty));
            prop_assert_eq!(queue.dequeue(), Err(Error::Empty));
            prop_assert!(queue.iter().next().is_none());
        }
    }
}
