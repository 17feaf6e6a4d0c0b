use tile_pathfinder::{Grid, PathfinderBuilder, Point, SearchStatus, TileData};

// Steps a bidirectional A* search tick by tick, the way an animation would replay it. A band
// of expensive tiles sits between start and goal with a single cheap crossing.

fn main() {
    env_logger::init();
    let mut grid = Grid::new(9, 7);
    for x in 0..8 {
        grid.mutate_tile(
            Point::new(x, 3),
            TileData {
                is_solid: false,
                path_cost: 6.0,
            },
        )
        .unwrap();
    }
    println!("{}", grid);

    let mut builder = PathfinderBuilder::new(&grid);
    builder
        .set_navigator("asterisk")
        .unwrap()
        .set_algorithm("bi-a*")
        .unwrap()
        .set_heuristic("octile")
        .unwrap();
    let pathfinder = builder.build();
    println!("Running {}", pathfinder.algorithm_name());

    let mut search = pathfinder.search(Point::new(1, 0), Point::new(1, 6));
    let mut tick = 0;
    let mut shown = 0;
    while !search.tick().is_terminal() || shown < search.visited().len() {
        tick += 1;
        for tile in &search.visited()[shown..] {
            println!(
                "tick {:>3}: {:?} finalized {} (g {:.2}, h {:.2})",
                tick, tile.side, tile.point, tile.g, tile.h
            );
        }
        shown = search.visited().len();
    }
    match search.status() {
        SearchStatus::Found => {
            println!("Path:");
            for tile in search.path() {
                println!("{} (cost {:.3})", tile.point, tile.cost);
            }
        }
        _ => println!("No path"),
    }
}
