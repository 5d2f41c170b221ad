pub mod tester;

pub use tester::LogicTester;
