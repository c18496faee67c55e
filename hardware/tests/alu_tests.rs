//! Unit tests for the ALU and branch resolution unit.

use lc2k_pipeline::core::pipeline::signals::AluOp;
use lc2k_pipeline::core::units::alu::Alu;
use lc2k_pipeline::core::units::bru::Bru;

/// Tests addition, including wrap-around.
#[test]
fn test_alu_add() {
    assert_eq!(Alu::execute(AluOp::Add, 10, 20), 30);
    assert_eq!(Alu::execute(AluOp::Add, 5, -7), -2);
    assert_eq!(Alu::execute(AluOp::Add, i32::MAX, 1), i32::MIN);
    assert_eq!(Alu::execute(AluOp::Add, i32::MIN, -1), i32::MAX);
}

/// Tests bitwise NOR.
#[test]
fn test_alu_nor() {
    assert_eq!(Alu::execute(AluOp::Nor, 0, 0), -1);
    assert_eq!(Alu::execute(AluOp::Nor, -1, 0), 0);
    assert_eq!(Alu::execute(AluOp::Nor, 0b1010, 0b0101), !0b1111);
    // nor x x == not x
    assert_eq!(Alu::execute(AluOp::Nor, 0x1234, 0x1234), !0x1234);
}

/// Tests branch target computation with negative offsets and wrapping.
#[test]
fn test_bru_target() {
    assert_eq!(Bru::target(3, 2), 5);
    assert_eq!(Bru::target(1, -1), 0);
    assert_eq!(Bru::target(0, -5), -5);
    assert_eq!(Bru::target(i32::MAX, 1), i32::MIN);
}

/// Tests that only a branch with equal operands is taken.
#[test]
fn test_bru_taken() {
    assert!(Bru::taken(true, 4, 4));
    assert!(!Bru::taken(true, 4, 5));
    assert!(!Bru::taken(false, 4, 4));
}
