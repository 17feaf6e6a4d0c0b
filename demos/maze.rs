use rand::rngs::StdRng;
use rand::SeedableRng;
use tile_pathfinder::{
    Algorithm, Grid, Heuristic, Navigator, NavigatorKind, Pathfinder, Point, TerrainGenerator,
    TerrainKind,
};

// Generates a maze and compares how much of it each algorithm explores before reaching the far
// corner.

fn main() {
    env_logger::init();
    let (w, h) = (41, 21);
    let start = Point::new(0, 0);
    let goal = Point::new(w - 1, h - 1);
    let mut grid = Grid::new(w as usize, h as usize);
    let mut rng = StdRng::seed_from_u64(0);
    TerrainGenerator::new(TerrainKind::Maze)
        .protect([start, goal])
        .generate(&mut grid, &mut rng)
        .unwrap();
    println!("{}", grid);

    let navigator = Navigator::new(&grid, NavigatorKind::Plus);
    for algorithm in Algorithm::ALL {
        let pathfinder = Pathfinder::new(navigator, *algorithm, Heuristic::Manhattan);
        let outcome = pathfinder.find_path(start, goal);
        println!(
            "{:<24} {:>4} finalized, path of {:>3} tiles, cost {:?}",
            pathfinder.algorithm_name(),
            outcome.visited.len(),
            outcome.path.len(),
            outcome.cost()
        );
    }
}
