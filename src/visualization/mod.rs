pub mod ballpit_vis2d;
