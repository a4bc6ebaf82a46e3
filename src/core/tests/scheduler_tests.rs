// Tests for Scheduler rotation, fairness and reporting
#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::core::{
        config::CafeConfig,
        errors::SchedulerError,
        report::{TurnReport, VisitEvent, VisitOutcome},
        scheduler::{Scheduler, SchedulerObserver},
        types::QueueId,
    };

    fn cafe() -> Scheduler {
        let config = CafeConfig::empty()
            .with_menu_item("latte", 5)
            .with_menu_item("tea", 3)
            .with_menu_item("mocha", 4);
        Scheduler::with_config(&config).unwrap()
    }

    #[test]
    fn test_one_task_from_each_queue_in_creation_order() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 2).unwrap();
        sched.create_queue("WalkIns", 2).unwrap();
        sched.enqueue("Mobile", "latte").unwrap();
        sched.enqueue("WalkIns", "tea").unwrap();

        let report = sched.run(2).unwrap();

        assert_eq!(report.visits.len(), 2);
        assert_eq!(report.visits[0].queue, QueueId::new("Mobile"));
        assert_eq!(report.visits[0].served()[0].id.as_str(), "Mobile-001");
        assert_eq!(report.visits[1].queue, QueueId::new("WalkIns"));
        assert_eq!(report.visits[1].served()[0].item, "tea");
        assert_eq!(report.total_minutes, 8);
        assert_eq!(sched.total_minutes(), 8);
        assert!(sched.queues().iter().all(|q| q.is_empty()));
    }

    #[test]
    fn test_weight_bounds_tasks_per_visit() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 3).unwrap();
        sched.set_weight("Mobile", 2).unwrap();
        for _ in 0..3 {
            sched.enqueue("Mobile", "latte").unwrap();
        }

        let report = sched.run(1).unwrap();

        let served: Vec<&str> = report.visits[0].served().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(served, vec!["Mobile-001", "Mobile-002"]);
        assert_eq!(report.minutes, 10);
        assert_eq!(sched.queue("Mobile").unwrap().len(), 1);
    }

    #[test]
    fn test_quantum_multiplies_weight() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 10).unwrap();
        sched.set_weight("Mobile", 2).unwrap();
        for _ in 0..7 {
            sched.enqueue("Mobile", "tea").unwrap();
        }

        let report = sched.run_with_quantum(3, 1).unwrap();
        assert_eq!(report.served_count(), 6);
        assert_eq!(sched.queue("Mobile").unwrap().len(), 1);
    }

    #[test]
    fn test_served_tasks_carry_start_times() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 3).unwrap();
        sched.create_queue("WalkIns", 3).unwrap();
        sched.set_weight("Mobile", 2).unwrap();
        sched.enqueue("Mobile", "latte").unwrap();
        sched.enqueue("Mobile", "tea").unwrap();
        sched.enqueue("WalkIns", "mocha").unwrap();

        let report = sched.run(2).unwrap();

        let starts: Vec<u64> = report.visits[0].served().iter().map(|t| t.started_at).collect();
        assert_eq!(starts, vec![0, 5]);
        assert_eq!(report.visits[1].started_at, 8);
        assert_eq!(report.visits[1].served()[0].started_at, 8);
        assert_eq!(report.total_minutes, 12);
    }

    #[test]
    fn test_skipped_queue_adds_no_time() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 2).unwrap();
        sched.create_queue("WalkIns", 2).unwrap();
        sched.enqueue("Mobile", "latte").unwrap();
        sched.enqueue("WalkIns", "tea").unwrap();
        sched.set_skip("Mobile").unwrap();

        let report = sched.run(2).unwrap();

        assert!(report.visits[0].is_skipped());
        assert_eq!(report.visits[0].minutes, 0);
        assert_eq!(report.total_minutes, 3);
        assert_eq!(sched.queue("Mobile").unwrap().len(), 1);
        assert_eq!(sched.turn(), 2);
    }

    #[test]
    fn test_skip_is_consumed_by_one_visit() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 2).unwrap();
        sched.enqueue("Mobile", "latte").unwrap();
        sched.set_skip("Mobile").unwrap();

        let first = sched.run(1).unwrap();
        assert!(first.visits[0].is_skipped());
        assert!(!sched.queue("Mobile").unwrap().is_skipped());

        let second = sched.run(1).unwrap();
        assert_eq!(second.served_count(), 1);
        assert_eq!(second.total_minutes, 5);
    }

    #[test]
    fn test_idle_visit_still_counts_a_turn() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 2).unwrap();
        sched.create_queue("WalkIns", 2).unwrap();
        sched.enqueue("WalkIns", "tea").unwrap();

        let report = sched.run(2).unwrap();
        assert!(report.visits[0].is_idle());
        assert_eq!(report.visits[0].turn, 1);
        assert_eq!(report.visits[1].turn, 2);
        assert_eq!(report.total_minutes, 3);
    }

    #[test]
    fn test_rotation_pointer_persists_across_runs() {
        let mut sched = cafe();
        for name in ["A", "B", "C"] {
            sched.create_queue(name, 1).unwrap();
        }

        sched.run(2).unwrap();
        assert_eq!(sched.next_queue(), Some(&QueueId::new("C")));

        let report = sched.run(2).unwrap();
        let order: Vec<&str> = report.visits.iter().map(|v| v.queue.as_str()).collect();
        assert_eq!(order, vec!["C", "A"]);
        assert_eq!(sched.next_queue(), Some(&QueueId::new("B")));
    }

    #[test]
    fn test_invalid_step_counts_rejected_without_change() {
        let mut sched = cafe();
        assert_eq!(
            sched.run(1).unwrap_err(),
            SchedulerError::InvalidStepCount { steps: 1, queues: 0 }
        );

        sched.create_queue("Mobile", 2).unwrap();
        sched.enqueue("Mobile", "latte").unwrap();

        for steps in [0, 2] {
            assert_eq!(
                sched.run(steps).unwrap_err(),
                SchedulerError::InvalidStepCount { steps, queues: 1 }
            );
        }
        assert_eq!(sched.turn(), 0);
        assert_eq!(sched.queue("Mobile").unwrap().len(), 1);
        assert_eq!(
            sched.run_with_quantum(0, 1).unwrap_err(),
            SchedulerError::InvalidQuantum(0)
        );
        assert_eq!(sched.turn(), 0);
    }

    #[test]
    fn test_enqueue_failures_leave_state_unchanged() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 1).unwrap();
        sched.enqueue("Mobile", "latte").unwrap();

        assert_eq!(
            sched.enqueue("Mobile", "tea").unwrap_err(),
            SchedulerError::CapacityExceeded(QueueId::new("Mobile"))
        );
        assert_eq!(
            sched.enqueue("Mobile", "soup").unwrap_err(),
            SchedulerError::UnknownItem("soup".to_string())
        );
        assert_eq!(
            sched.enqueue("Drive", "tea").unwrap_err(),
            SchedulerError::UnknownQueue(QueueId::new("Drive"))
        );

        let queue = sched.queue("Mobile").unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_task_id().as_str(), "Mobile-002");
    }

    #[test]
    fn test_unknown_item_does_not_burn_id() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 3).unwrap();
        assert!(sched.enqueue("Mobile", "soup").is_err());

        let ids: Vec<String> = (0..3)
            .map(|_| sched.enqueue("Mobile", "tea").unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["Mobile-001", "Mobile-002", "Mobile-003"]);
    }

    #[test]
    fn test_special_not_consumed_by_rejected_order() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 1).unwrap();
        sched.create_queue("WalkIns", 2).unwrap();
        sched.enqueue("Mobile", "tea").unwrap();
        sched.set_special("latte", 1, 1).unwrap();

        assert!(sched.enqueue("Mobile", "latte").is_err());
        sched.enqueue("WalkIns", "latte").unwrap();
        sched.enqueue("WalkIns", "latte").unwrap();

        let times: Vec<u32> = sched
            .queue("WalkIns")
            .unwrap()
            .iter()
            .map(|t| t.prep_minutes)
            .collect();
        assert_eq!(times, vec![1, 5]);
    }

    #[test]
    fn test_duplicate_and_invalid_queues() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 2).unwrap();
        assert_eq!(
            sched.create_queue("Mobile", 5).unwrap_err(),
            SchedulerError::DuplicateQueue(QueueId::new("Mobile"))
        );
        assert_eq!(
            sched.create_queue("Empty", 0).unwrap_err(),
            SchedulerError::InvalidCapacity(0)
        );
        assert_eq!(sched.queue_count(), 1);
        assert_eq!(sched.queue("Mobile").unwrap().capacity(), 2);
    }

    #[test]
    fn test_zero_quantum_config_rejected() {
        let config = CafeConfig::default().with_quantum(0);
        assert!(matches!(
            Scheduler::with_config(&config),
            Err(SchedulerError::InvalidQuantum(0))
        ));
    }

    #[test]
    fn test_snapshot_reflects_queues() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 2).unwrap();
        sched.create_queue("WalkIns", 2).unwrap();
        sched.set_weight("WalkIns", 3).unwrap();
        sched.set_skip("Mobile").unwrap();
        sched.enqueue("WalkIns", "mocha").unwrap();

        let snap = sched.snapshot();
        assert_eq!(snap.time, 0);
        assert_eq!(snap.next, Some(QueueId::new("Mobile")));
        assert_eq!(snap.menu[0], ("latte".to_string(), 5));
        assert!(snap.queues[0].skip);
        assert_eq!(snap.queues[1].weight, 3);
        assert_eq!(snap.queues[1].tasks[0].id.as_str(), "WalkIns-001");
        assert_eq!(snap.queues[1].tasks[0].prep_minutes, 4);
    }

    struct Recorder {
        visits: Rc<RefCell<Vec<VisitEvent>>>,
        reports: Rc<RefCell<Vec<u64>>>,
    }

    impl SchedulerObserver for Recorder {
        fn on_visit(&mut self, visit: &VisitEvent) {
            self.visits.borrow_mut().push(visit.clone());
        }

        fn on_run_complete(&mut self, report: &TurnReport) {
            self.reports.borrow_mut().push(report.total_minutes);
        }
    }

    #[test]
    fn test_observers_notified_after_run() {
        let visits = Rc::new(RefCell::new(Vec::new()));
        let reports = Rc::new(RefCell::new(Vec::new()));
        let mut sched = cafe();
        sched.add_observer(Box::new(Recorder {
            visits: Rc::clone(&visits),
            reports: Rc::clone(&reports),
        }));
        sched.create_queue("Mobile", 2).unwrap();
        sched.create_queue("WalkIns", 2).unwrap();
        sched.enqueue("Mobile", "latte").unwrap();

        sched.run(2).unwrap();

        let seen = visits.borrow();
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0].outcome, VisitOutcome::Served(_)));
        assert_eq!(seen[1].outcome, VisitOutcome::Idle);
        assert_eq!(*reports.borrow(), vec![5]);
    }

    #[test]
    fn test_drain_serves_weighted_and_skipped_queues() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 3).unwrap();
        sched.create_queue("WalkIns", 2).unwrap();
        sched.set_weight("Mobile", 2).unwrap();
        for _ in 0..3 {
            sched.enqueue("Mobile", "latte").unwrap();
        }
        sched.enqueue("WalkIns", "tea").unwrap();
        sched.enqueue("WalkIns", "tea").unwrap();
        sched.set_skip("WalkIns").unwrap();

        let report = sched.run_until_drained(1).unwrap();

        let served: Vec<usize> = report.visits.iter().map(|v| v.served().len()).collect();
        assert_eq!(served, vec![2, 0, 1, 1, 0, 1]);
        assert_eq!(report.visits[1].outcome, VisitOutcome::Skipped);
        assert_eq!(report.visits[4].outcome, VisitOutcome::Idle);
        assert_eq!(report.served_count(), 5);
        assert_eq!(report.minutes, 21);
        assert!(sched.is_drained());

        let snapshot = sched.snapshot();
        assert_eq!(snapshot.time, 21);
        assert_eq!(snapshot.next, Some(QueueId::new("Mobile")));
        for queue in &snapshot.queues {
            assert_eq!(queue.len, 0);
            assert!(queue.tasks.is_empty());
            assert!(!queue.skip);
        }
    }

    #[test]
    fn test_drain_makes_at_least_one_visit() {
        let mut sched = cafe();
        sched.create_queue("Mobile", 1).unwrap();
        sched.create_queue("WalkIns", 1).unwrap();

        let report = sched.run_until_drained(1).unwrap();
        assert_eq!(report.visits.len(), 1);
        assert_eq!(report.visits[0].outcome, VisitOutcome::Idle);

        // A pending skip on an empty queue still has to be spent
        sched.set_skip("Mobile").unwrap();
        let report = sched.run_until_drained(1).unwrap();
        let outcomes: Vec<&VisitOutcome> = report.visits.iter().map(|v| &v.outcome).collect();
        assert_eq!(outcomes, vec![&VisitOutcome::Idle, &VisitOutcome::Skipped]);
        assert!(sched.is_drained());
    }

    #[test]
    fn test_drain_guards() {
        let mut sched = cafe();
        assert_eq!(sched.run_until_drained(1).unwrap_err(), SchedulerError::NoQueues);

        sched.create_queue("Mobile", 1).unwrap();
        sched.enqueue("Mobile", "tea").unwrap();
        assert_eq!(
            sched.run_until_drained(0).unwrap_err(),
            SchedulerError::InvalidQuantum(0)
        );
        assert_eq!(sched.turn(), 0);
        assert_eq!(sched.queue("Mobile").unwrap().len(), 1);
    }
}
