pub mod given_steps;
pub mod then_steps;
pub mod when_steps;
