//! Scenarios every `WorkExecutor` backend must pass.
//!
//! `executor_suite!(make_executor)` expands to one `#[test]` per scenario. `make_executor` is an expression that
//! produces a fresh executor.

//-------------------------------------------------------------------------------------------------------------------

macro_rules! executor_suite
{
    ($make_executor:expr) =>
    {
        //local shortcuts
        use crate::common::*;
        use work_executor::*;

        //third-party shortcuts

        //standard shortcuts
        use std::sync::Arc;
        use std::time::{Duration, Instant};

        //-----------------------------------------------------------------------------------------------------------

        #[test]
        fn submit_action_runs()
        {
            init_tracing();
            let executor = $make_executor;
            let (sender, receiver) = crossbeam::channel::bounded::<()>(1);

            let _handle = executor.submit_action(Arc::new(move || -> Result<(), Kaboom>
                {
                    let _ = sender.send(());
                    Ok(())
                })).unwrap();

            receiver.recv_timeout(Duration::from_millis(1000)).unwrap();
        }

        #[test]
        fn successful_action_yields_itself()
        {
            init_tracing();
            let executor = $make_executor;
            let action = Arc::new(StubAction);

            let handle = executor.submit_action(action.clone()).unwrap();

            assert!(Arc::ptr_eq(&action, &handle.get().unwrap()));
        }

        #[test]
        fn submit_computation_runs()
        {
            init_tracing();
            let executor = $make_executor;
            let (sender, receiver) = crossbeam::channel::bounded::<()>(1);

            let _handle = executor.submit(move || -> Result<(), Kaboom>
                {
                    let _ = sender.send(());
                    Ok(())
                }).unwrap();

            receiver.recv_timeout(Duration::from_millis(1000)).unwrap();
        }

        #[test]
        fn computation_yields_its_result()
        {
            init_tracing();
            let executor = $make_executor;

            let handle = executor.submit(|| -> Result<String, Kaboom> { Ok(String::from("ok")) }).unwrap();

            assert_eq!(handle.get().unwrap(), "ok");
            assert_eq!(handle.status(), WorkStatus::Succeeded);
        }

        #[test]
        fn computation_yields_non_clone_result()
        {
            init_tracing();
            let executor = $make_executor;

            let handle = executor.submit(|| -> Result<crossbeam::channel::Receiver<u32>, Kaboom>
                {
                    let (sender, receiver) = crossbeam::channel::bounded(1);
                    let _ = sender.send(11);
                    Ok(receiver)
                }).unwrap();

            let receiver = handle.take_timeout(Duration::from_millis(1000)).unwrap();
            assert_eq!(receiver.recv().unwrap(), 11);
            assert!(matches!(handle.take(), Err(ResultError::Taken)));
        }

        #[test]
        fn failed_computation_returns_original_error()
        {
            init_tracing();
            let executor = $make_executor;
            let handle = failing(&executor);

            let Err(ResultError::Failed(failure)) = handle.get() else { panic!("expected failure"); };
            assert_eq!(failure.to_string(), "kaboom");
            assert_eq!(failure.downcast_ref::<Kaboom>(), Some(&Kaboom));
            assert_eq!(handle.status(), WorkStatus::Failed);
        }

        #[test]
        fn panicking_computation_fails()
        {
            init_tracing();
            let executor = $make_executor;

            let handle = executor.submit(|| -> Result<(), Kaboom> { panic!("boom") }).unwrap();

            assert!(executor.wait_for_completion(&handle, Duration::from_millis(1000)));
            let Err(ResultError::Failed(failure)) = handle.get() else { panic!("expected failure"); };
            assert!(failure.is_panic());
            assert!(failure.to_string().contains("boom"));
        }

        //-----------------------------------------------------------------------------------------------------------

        #[test]
        fn wait_for_completion_true_for_completes_normally()
        {
            init_tracing();
            let executor = $make_executor;
            let handle = sleeping(&executor, 100);

            assert!(executor.wait_for_completion(&handle, Duration::from_millis(200)));
        }

        #[test]
        fn wait_for_completion_true_for_failure()
        {
            init_tracing();
            let executor = $make_executor;
            let handle = failing(&executor);

            assert!(executor.wait_for_completion(&handle, Duration::from_millis(200)));
        }

        #[test]
        fn wait_for_completion_false_for_timeout()
        {
            init_tracing();
            let executor = $make_executor;
            let handle = sleeping(&executor, 1000);

            assert!(!executor.wait_for_completion(&handle, Duration::from_millis(100)));
        }

        #[test]
        fn wait_for_completion_false_for_cancelled()
        {
            init_tracing();
            let executor = $make_executor;
            let handle = sleeping(&executor, 10_000);

            // race to cancel before the work starts
            assert!(handle.cancel());

            assert!(!executor.wait_for_completion(&handle, Duration::from_millis(100)));
        }

        #[test]
        fn wait_for_completion_false_for_cancelled_while_running()
        {
            init_tracing();
            let executor = $make_executor;
            let handle = cancelled_while_running(&executor);

            assert!(!executor.wait_for_completion(&handle, Duration::from_millis(100)));
            assert_eq!(handle.status(), WorkStatus::Cancelled);
        }

        #[test]
        fn wait_for_completion_false_when_waiter_interrupted()
        {
            init_tracing();
            let executor = $make_executor;
            let handle = sleeping(&executor, 10_000);

            interrupt_after(50);
            let start = Instant::now();
            assert!(!executor.wait_for_completion(&handle, Duration::from_millis(5000)));
            assert!(start.elapsed() < Duration::from_millis(2000));

            // the interrupt is preserved for the caller
            assert!(work_executor::is_interrupted());
            assert!(take_interrupt());
            assert!(!handle.is_done());
        }

        //-----------------------------------------------------------------------------------------------------------

        #[test]
        fn wait_for_all_false_when_one_slow()
        {
            init_tracing();
            let executor = $make_executor;
            let slow = sleeping(&executor, 10_000);
            let fast = sleeping(&executor, 100);

            assert!(!executor.wait_for_all_to_complete(&[&slow, &fast], Duration::from_millis(200)));
        }

        #[test]
        fn wait_for_all_true_when_all_complete()
        {
            init_tracing();
            let executor = $make_executor;
            let first = no_op(&executor);
            let second = no_op(&executor);

            assert!(executor.wait_for_all_to_complete(&[&first, &second], Duration::from_millis(100)));
        }

        #[test]
        fn wait_for_all_false_when_one_cancelled()
        {
            init_tracing();
            let executor = $make_executor;
            let to_cancel = sleeping(&executor, 10_000);

            // race to cancel before the work starts
            to_cancel.cancel();

            let fast = sleeping(&executor, 100);

            assert!(!executor.wait_for_all_to_complete(&[&fast, &to_cancel], Duration::from_millis(200)));
        }

        #[test]
        fn wait_for_all_false_when_one_cancelled_while_running()
        {
            init_tracing();
            let executor = $make_executor;
            let slow = sleeping(&executor, 10_000);
            let cancelled = cancelled_while_running(&executor);

            assert!(!executor.wait_for_all_to_complete(&[&slow, &cancelled], Duration::from_millis(200)));
        }

        #[test]
        fn wait_for_all_true_when_one_fails()
        {
            init_tracing();
            let executor = $make_executor;
            let first = no_op(&executor);
            let second = failing(&executor);

            assert!(executor.wait_for_all_to_complete(&[&first, &second], Duration::from_millis(100)));
        }

        #[test]
        fn wait_for_all_mixes_result_types()
        {
            init_tracing();
            let executor = $make_executor;
            let number = executor.submit(|| -> Result<u64, Kaboom> { Ok(42) }).unwrap();
            let text = executor.submit(|| -> Result<String, Kaboom> { Ok(String::from("done")) }).unwrap();
            let action = no_op(&executor);

            assert!(executor.wait_for_all_to_complete(&[&number, &text, &action], Duration::from_millis(500)));
            assert_eq!(number.get().unwrap(), 42);
            assert_eq!(text.get().unwrap(), "done");
        }

        //-----------------------------------------------------------------------------------------------------------

        #[test]
        fn wait_for_any_true_when_one_completes()
        {
            init_tracing();
            let executor = $make_executor;
            let slow = sleeping(&executor, 10_000);
            let fast = sleeping(&executor, 50);

            assert!(executor.wait_for_any_to_complete(&[&slow, &fast], Duration::from_millis(200)));
        }

        #[test]
        fn wait_for_any_true_when_all_complete()
        {
            init_tracing();
            let executor = $make_executor;
            let first = no_op(&executor);
            let second = no_op(&executor);

            assert!(executor.wait_for_any_to_complete(&[&first, &second], Duration::from_millis(100)));
        }

        #[test]
        fn wait_for_any_true_when_one_cancelled()
        {
            init_tracing();
            let executor = $make_executor;
            let to_cancel = sleeping(&executor, 10_000);

            // race to cancel before the work starts
            to_cancel.cancel();

            let slow = sleeping(&executor, 10_000);

            assert!(executor.wait_for_any_to_complete(&[&slow, &to_cancel], Duration::from_millis(200)));
        }

        #[test]
        fn wait_for_any_true_when_one_cancelled_while_running()
        {
            init_tracing();
            let executor = $make_executor;
            let slow = sleeping(&executor, 10_000);
            let cancelled = cancelled_while_running(&executor);

            assert!(executor.wait_for_any_to_complete(&[&slow, &cancelled], Duration::from_millis(200)));
        }

        #[test]
        fn wait_for_any_true_when_one_fails()
        {
            init_tracing();
            let executor = $make_executor;
            let slow = sleeping(&executor, 10_000);
            let failed = failing(&executor);

            assert!(executor.wait_for_any_to_complete(&[&slow, &failed], Duration::from_millis(100)));
        }

        #[test]
        fn wait_for_any_false_when_none_complete()
        {
            init_tracing();
            let executor = $make_executor;
            let slow = sleeping(&executor, 10_000);
            let slow2 = sleeping(&executor, 10_000);

            let start = Instant::now();
            assert!(!executor.wait_for_any_to_complete(&[&slow, &slow2], Duration::from_millis(100)));

            // bounded by the timeout plus one time slice
            let limit = Duration::from_millis(100) + executor.wait_config().max_time_slice;
            assert!(start.elapsed() < limit + Duration::from_millis(100));
        }
    };
}

//-------------------------------------------------------------------------------------------------------------------
