pub mod game;
pub mod infection;
pub mod map;
pub mod player;
pub mod point_of_interest;
