// Integration tests for the engine's blocking and debug modes

use brainstep::interpreter::ResultClass;
use brainstep::io::{BinaryInput, CapturedOutput, TextInput};
use brainstep::program::{self, Instruction};
use brainstep::{Engine, EngineError, EngineState, ExecutionResult, ResultKind};

const HELLO_WORLD: &str = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";

fn engine_with_output(source: &str, memory_size: usize) -> (Engine, CapturedOutput) {
    let output = CapturedOutput::new();
    let engine = Engine::builder(source)
        .memory_size(memory_size)
        .output(output.clone())
        .build()
        .expect("program should validate");
    (engine, output)
}

#[test]
fn test_clear_loop() {
    let mut engine = Engine::new(1, None, None, "+[-]").unwrap();
    assert_eq!(engine.run(), ExecutionResult::Successful);
    assert_eq!(engine.cells(0..1), &[0]);
    assert_eq!(engine.state(), EngineState::Finished(ExecutionResult::Successful));
}

#[test]
fn test_hello_world() {
    let (mut engine, output) = engine_with_output(HELLO_WORLD, 30_000);
    assert_eq!(engine.run(), ExecutionResult::Successful);
    assert_eq!(output.text(), "Hello World!\n");
    assert_eq!(output.lines(), vec!["Hello World!".to_string()]);
}

#[test]
fn test_hello_world_through_closure_sink() {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut engine = Engine::builder(HELLO_WORLD)
        .output(move |value: i32| {
            let _ = tx.send(value);
        })
        .build()
        .unwrap();
    assert_eq!(engine.run(), ExecutionResult::Successful);
    drop(engine);
    let text: String = rx
        .iter()
        .map(|v| char::from_u32(v as u32).unwrap())
        .collect();
    assert_eq!(text, "Hello World!\n");
}

#[test]
fn test_stepping_with_breakpoint() {
    let mut engine = Engine::new(1, None, None, "++#++").unwrap();

    assert_eq!(engine.step(), ExecutionResult::Successful);
    assert_eq!(engine.step(), ExecutionResult::Successful);
    assert_eq!(engine.cells(0..1), &[2]);

    assert_eq!(engine.step(), ExecutionResult::BreakpointHit);
    assert_eq!(engine.cells(0..1), &[2]);
    assert_eq!(engine.instruction_pointer(), 3);
    assert_eq!(engine.state(), EngineState::Suspended);

    assert_eq!(engine.step(), ExecutionResult::Successful);
    assert_eq!(engine.step(), ExecutionResult::Successful);
    assert_eq!(engine.cells(0..1), &[4]);

    assert_eq!(engine.step(), ExecutionResult::EndOfCodeReached);
    assert_eq!(engine.step(), ExecutionResult::EndOfCodeReached);
    assert_eq!(engine.cells(0..1), &[4]);
    assert_eq!(engine.state(), EngineState::Running);
}

#[test]
fn test_resume_after_completed_run_returns() {
    let (mut engine, output) = engine_with_output("+.", 1);
    assert_eq!(engine.run(), ExecutionResult::Successful);
    assert_eq!(engine.resume(), ExecutionResult::EndOfCodeReached);
    assert_eq!(engine.step(), ExecutionResult::EndOfCodeReached);
    assert_eq!(output.values(), vec![1]);
    assert_eq!(engine.run(), ExecutionResult::Successful);
}

#[test]
fn test_stepping_loops_visits_brackets() {
    // `[` on zero jumps past its partner; `]` on nonzero jumps back to its partner
    let mut engine = Engine::new(2, None, None, "[>]+[-]").unwrap();

    assert_eq!(engine.current_instruction(), Some((0, Instruction::LoopBegin)));
    assert_eq!(engine.step(), ExecutionResult::Successful);
    assert_eq!(engine.instruction_pointer(), 3);

    engine.step(); // +
    assert_eq!(engine.current_instruction(), Some((4, Instruction::LoopBegin)));
    engine.step(); // [
    engine.step(); // -
    assert_eq!(engine.current_instruction(), Some((6, Instruction::LoopEnd)));
    engine.step(); // ] on zero falls through
    assert_eq!(engine.instruction_pointer(), 7);
    assert_eq!(engine.step(), ExecutionResult::EndOfCodeReached);
    assert_eq!(engine.cursor(), 0);
}

#[test]
fn test_resume_runs_between_breakpoints() {
    let (mut engine, output) = engine_with_output("+.#+.#+.", 1);
    assert_eq!(engine.resume(), ExecutionResult::BreakpointHit);
    assert_eq!(output.values(), vec![1]);
    assert_eq!(engine.resume(), ExecutionResult::BreakpointHit);
    assert_eq!(output.values(), vec![1, 2]);
    assert_eq!(engine.resume(), ExecutionResult::EndOfCodeReached);
    assert_eq!(output.values(), vec![1, 2, 3]);
}

#[test]
fn test_negative_cursor_fails_lazily() {
    let mut engine = Engine::new(1, None, None, "<+").unwrap();
    assert_eq!(engine.step(), ExecutionResult::Successful);
    assert_eq!(engine.cursor(), -1);

    let result = engine.step();
    assert_eq!(
        result,
        ExecutionResult::Failed(EngineError::PointerNegative { cursor: -1 })
    );
    assert_eq!(result.kind(), ResultKind::PointerNegative);
    assert_eq!(result.class(), ResultClass::ResourceAccess);
    // The failing instruction is where the pointer stays
    assert_eq!(engine.instruction_pointer(), 1);
}

#[test]
fn test_cursor_can_wander_out_and_back() {
    let mut engine = Engine::new(1, None, None, "<<>>+").unwrap();
    assert_eq!(engine.run(), ExecutionResult::Successful);
    assert_eq!(engine.cells(0..1), &[1]);
}

#[test]
fn test_cursor_past_end_fails() {
    let mut engine = Engine::new(1, None, None, ">+").unwrap();
    let result = engine.run();
    assert_eq!(
        result,
        ExecutionResult::Failed(EngineError::PointerOutOfRange { cursor: 1, len: 1 })
    );
    assert_eq!(result.kind(), ResultKind::PointerOutOfRange);
    assert!(result.into_result().is_err());
}

#[test]
fn test_empty_tape_rejects_any_access() {
    let mut engine = Engine::new(0, None, None, "+").unwrap();
    assert_eq!(
        engine.run(),
        ExecutionResult::Failed(EngineError::PointerOutOfRange { cursor: 0, len: 0 })
    );
}

#[test]
fn test_construction_rejects_unbalanced_brackets() {
    let err = Engine::new(8, None, None, "+[[-]").unwrap_err();
    assert_eq!(err, EngineError::UnclosedLoop { position: 1 });
    assert!(err.is_structural());

    let err = Engine::new(8, None, None, "+[-]]").unwrap_err();
    assert_eq!(err, EngineError::UnmatchedLoopEnd { position: 4 });
    assert_eq!(ExecutionResult::from(err).kind(), ResultKind::UnmatchedLoopEnd);

    assert_eq!(
        program::check("]["),
        Err(EngineError::UnmatchedLoopEnd { position: 0 })
    );
    assert_eq!(program::check("a[b]c"), Ok(()));
}

#[test]
fn test_missing_channels() {
    let mut engine = Engine::new(1, None, None, "+.").unwrap();
    let result = engine.run();
    assert_eq!(result, ExecutionResult::Failed(EngineError::NoOutputSink));
    assert_eq!(result.kind(), ResultKind::NoOutputSink);

    let mut engine = Engine::new(1, None, None, ",").unwrap();
    assert_eq!(
        engine.step(),
        ExecutionResult::Failed(EngineError::NoInputSource)
    );
}

#[test]
fn test_echo_text_input() {
    let output = CapturedOutput::new();
    let mut engine = Engine::builder(",[.,]")
        .memory_size(1)
        .input(TextInput::from_text("héllo"))
        .output(output.clone())
        .build()
        .unwrap();
    assert_eq!(engine.run(), ExecutionResult::Successful);
    assert_eq!(output.text(), "héllo");
}

#[test]
fn test_binary_input_reads_bytes() {
    let output = CapturedOutput::new();
    let mut engine = Engine::builder(",.,.,.")
        .memory_size(1)
        .input(BinaryInput::from_bytes(&[0xC3, 0xA9]))
        .output(output.clone())
        .build()
        .unwrap();
    assert_eq!(engine.run(), ExecutionResult::Successful);
    // Exhausted input reads as 0
    assert_eq!(output.values(), vec![0xC3, 0xA9, 0]);
}

#[test]
fn test_introspection_while_stepping() {
    let mut engine = Engine::new(4, None, None, "+>++>+++").unwrap();
    for _ in 0..4 {
        engine.step();
    }
    assert_eq!(engine.instruction_pointer(), 4);
    assert_eq!(engine.cursor(), 1);
    assert_eq!(engine.cells(0..4), &[1, 2, 0, 0]);
    assert_eq!(engine.tape().get(1), Some(2));
    assert_eq!(engine.instruction_at(4), Some(Instruction::MoveRight));
    assert_eq!(engine.state(), EngineState::Running);
}

#[test]
fn test_reset_after_error_allows_rerun() {
    let (mut engine, output) = engine_with_output("+.<<+", 2);
    assert!(engine.run().is_error());
    engine.reset();
    assert_eq!(engine.cursor(), 0);
    assert!(engine.run().is_error());
    assert_eq!(output.values(), vec![1, 1]);
}
