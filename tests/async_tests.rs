// Integration tests for cancellable background runs

use brainstep::io::CapturedOutput;
use brainstep::{Engine, EngineError, EngineState, ExecutionResult};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[test]
fn test_cancel_infinite_loop() {
    let engine = Engine::new(1, None, None, "+[]").unwrap();
    let (tx, rx) = mpsc::channel();
    let run = engine
        .run_async(move |result| {
            tx.send(result).unwrap();
        })
        .unwrap();

    thread::sleep(Duration::from_millis(20));
    assert!(!run.is_finished());
    run.cancel();

    let delivered = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("completion callback should fire");
    assert_eq!(delivered, ExecutionResult::ExecutionCancelled);

    let (engine, result) = run.join().unwrap();
    assert_eq!(result, ExecutionResult::ExecutionCancelled);
    assert_eq!(
        engine.state(),
        EngineState::Finished(ExecutionResult::ExecutionCancelled)
    );
    assert_eq!(engine.cells(0..1), &[1]);

    // Callback fires exactly once
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_cancel_through_shared_token() {
    let engine = Engine::new(1, None, None, "+[]").unwrap();
    let run = engine.spawn().unwrap();
    let token = run.cancel_token();

    let canceller = thread::spawn(move || token.cancel());
    canceller.join().unwrap();

    let (_, result) = run.join().unwrap();
    assert_eq!(result, ExecutionResult::ExecutionCancelled);
}

#[test]
fn test_async_output_matches_blocking() {
    let source = "++++++++[>++++++++<-]>+.+.+.";
    let output = CapturedOutput::new();
    let engine = Engine::builder(source)
        .memory_size(2)
        .output(output.clone())
        .build()
        .unwrap();

    let (_, result) = engine.spawn().unwrap().join().unwrap();
    assert_eq!(result, ExecutionResult::Successful);
    assert_eq!(output.text(), "ABC");
}

#[test]
fn test_async_reports_errors_through_callback() {
    let engine = Engine::new(1, None, None, "+.").unwrap();
    let (tx, rx) = mpsc::channel();
    let run = engine.run_async(move |result| tx.send(result).unwrap()).unwrap();

    let (_, result) = run.join().unwrap();
    let expected = ExecutionResult::Failed(EngineError::NoOutputSink);
    assert_eq!(result, expected);
    assert_eq!(rx.recv().unwrap(), expected);
}

#[test]
fn test_engine_comes_back_for_debugging() {
    let engine = Engine::new(2, None, None, "+>+#+").unwrap();
    let (mut engine, result) = engine.spawn().unwrap().join().unwrap();
    assert_eq!(result, ExecutionResult::Successful);
    assert_eq!(engine.cells(0..2), &[1, 2]);

    // Nothing is left to step until reset
    assert_eq!(engine.step(), ExecutionResult::EndOfCodeReached);
    assert_eq!(engine.resume(), ExecutionResult::EndOfCodeReached);
    engine.reset();
    assert_eq!(engine.resume(), ExecutionResult::BreakpointHit);
    assert_eq!(engine.cells(0..2), &[1, 1]);
}
