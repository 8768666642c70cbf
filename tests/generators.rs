use quickcheck_macros::quickcheck;
use tween_viz::grid::GridSpec;
use tween_viz::palette::{Palette, PaletteSource};
use tween_viz::states::{StateGenerator, StateSequence, StateSource};

#[test]
fn cell_centers_map_to_ndc() {
    let grid = GridSpec::new(2, 1, 2.0, 2.0, 4.0, 2.0).unwrap();
    let points = grid.points();
    assert_eq!(&points[0..2], &[-0.5, 0.0]);
    assert_eq!(&points[2..4], &[0.5, 0.0]);
}

#[quickcheck]
fn grid_covers_every_cell(cols: u8, rows: u8) -> bool {
    let cols = cols.max(1) as u32;
    let rows = rows.max(1) as u32;
    let (width, height) = (cols as f32 * 7.0, rows as f32 * 3.0);
    let grid = GridSpec::new(cols, rows, 7.0, 3.0, width, height).unwrap();
    let points = grid.points();

    points.len() == (cols * rows * 2) as usize
        && points.iter().all(|v| (-1.0..=1.0).contains(v))
        && (0..rows).all(|row| {
            (0..cols).all(|col| {
                let i = (row * cols + col) as usize;
                let x = ((2.0 * (col as f32 * 7.0 + 3.5)) / width) - 1.0;
                let y = ((2.0 * (row as f32 * 3.0 + 1.5)) / height) - 1.0;
                points[2 * i] == x && points[2 * i + 1] == y
            })
        })
}

#[quickcheck]
fn fitted_grid_stays_inside_canvas(width: u16, height: u16, cols: u8) -> bool {
    let width = (width % 4096).max(64) as f32;
    let height = (height % 1024).max(1) as f32;
    let cols = cols % 64;
    match GridSpec::fit(width, height, cols as u32) {
        Ok(grid) => {
            grid.rows == (grid.cols as f64 * (height as f64 / width as f64)) as u32
                && grid.points().iter().all(|v| (-1.0..=1.0).contains(v))
        }
        Err(_) => cols == 0 || (cols as f64 * (height as f64 / width as f64)) < 1.0,
    }
}

fn magma_generator(source: StateSource) -> StateGenerator {
    let palette = PaletteSource::magma_nine().build().unwrap();
    StateGenerator::new(palette, 1e-6, 2.0, source).unwrap()
}

#[quickcheck]
fn states_are_deterministic_and_bounded(count: u16, position: u16, seed: u64) -> bool {
    let count = count.max(1) as usize;
    let position = position as usize;
    [StateSource::Periodic, StateSource::Seeded { seed }]
        .into_iter()
        .all(|source| {
            let generator = magma_generator(source);
            let first = generator.generate(count, position).unwrap();
            let second = generator.generate(count, position).unwrap();
            let palette = generator.palette();
            first == second
                && first.len() == count
                && first.scales.iter().all(|s| (1e-6..=2.0).contains(s))
                && first
                    .colors
                    .chunks_exact(3)
                    .all(|rgb| palette.colors().iter().any(|c| c == rgb))
        })
}

#[quickcheck]
fn palette_index_stays_in_range(selector: f32) -> bool {
    let palette = Palette::brewer_pubu();
    palette.index_for(selector) < palette.len()
}

#[test]
fn sequence_is_built_eagerly_in_order() {
    let generator = magma_generator(StateSource::Periodic);
    let sequence = StateSequence::build(&generator, 12, 5).unwrap();
    assert_eq!(sequence.len(), 5);
    assert_eq!(sequence.count(), 12);
    for (position, state) in sequence.states().iter().enumerate() {
        assert_eq!(state, &generator.generate(12, position).unwrap());
    }
}
