// Interactive session loop and its state
pub mod session;
