use tile_pathfinder::{Grid, PathfinderBuilder, Point};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood, diagonals past the obstacle are not allowed to cut its corner

fn main() {
    env_logger::init();
    let mut grid = Grid::new(3, 3);
    grid.mutate_default(Point::new(1, 1), true).unwrap();
    println!("{}", grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let mut builder = PathfinderBuilder::new(&grid);
    builder
        .set_navigator("asterisk")
        .unwrap()
        .set_algorithm("a*")
        .unwrap()
        .set_heuristic("octile")
        .unwrap();
    let outcome = builder.build().find_path(start, end);
    println!("Path:");
    for tile in &outcome.path {
        println!("{} (cost {:.3})", tile.point, tile.cost);
    }
}
