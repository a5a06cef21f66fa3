use kurbo::{Point, Size};
use std::time::{Duration, Instant};
use zenflow_core::{
    ArtworkDraft, ArtworkStore, Gallery, InkColor, MemoryArtworkStore, Path, PathList, ReplayScheduler, StrokePoint,
};
use zenflow_render::{PathRenderer, RenderFrame, SegmentSurface, Surface};

const DELAY: Duration = Duration::from_millis(10);

fn stroke(origin: Point, points: usize, color: InkColor) -> Path {
    let points = (0..points)
        .map(|i| StrokePoint::weighted(Point::new(origin.x + i as f64 * 4.0, origin.y), 3.0 + i as f64))
        .collect();
    Path::new(points, color, 5.0, 0.9).unwrap()
}

fn render(paths: &[Path]) -> SegmentSurface {
    let mut surface = SegmentSurface::create(Size::new(800.0, 600.0));
    PathRenderer::new().render(&RenderFrame::new(paths), &mut surface);
    surface
}

/// Drive the scheduler one frame per delay until it stops, rendering every
/// frame. Returns the number of frames.
fn play(scheduler: &mut ReplayScheduler, t0: Instant) -> usize {
    let mut now = t0;
    let mut frames = 0;
    while scheduler.is_replaying() {
        now += DELAY;
        scheduler.advance(now);
        render(scheduler.revealed());
        frames += 1;
    }
    frames
}

#[test]
fn test_replayed_artwork_renders_like_the_original() {
    let store = MemoryArtworkStore::new();
    let mut gallery = Gallery::new();
    let draft = ArtworkDraft::new(
        "Flow replay",
        vec![
            stroke(Point::new(10.0, 10.0), 6, InkColor::new(0x4E, 0xCD, 0xC4)),
            stroke(Point::new(10.0, 80.0), 3, InkColor::new(0xFF, 0x6B, 0x6B)),
        ],
    );
    let id = pollster::block_on(gallery.create(&store, draft)).unwrap().id.clone();
    gallery.set_active(Some(id.as_str()));
    let source: PathList = gallery.active_paths().unwrap();

    let t0 = Instant::now();
    let mut scheduler = ReplayScheduler::new(DELAY);
    scheduler.set_source(Some(source.clone()), t0);
    play(&mut scheduler, t0);

    assert!(scheduler.is_complete());
    assert_eq!(render(scheduler.revealed()), render(&source));

    let stored = pollster::block_on(store.get(&id)).unwrap();
    assert_eq!(render(scheduler.revealed()), render(&stored.paths));
}

#[test]
fn test_two_replays_reveal_identically() {
    let source: PathList = vec![
        stroke(Point::new(0.0, 0.0), 4, InkColor::default()),
        stroke(Point::new(0.0, 40.0), 5, InkColor::default()),
    ]
    .into();

    let t0 = Instant::now();
    let mut scheduler = ReplayScheduler::new(DELAY);
    scheduler.set_source(Some(source.clone()), t0);
    let first_frames = play(&mut scheduler, t0);
    let first = (scheduler.revealed_points(), scheduler.revealed().to_vec());

    scheduler.start(t0);
    let second_frames = play(&mut scheduler, t0);
    let second = (scheduler.revealed_points(), scheduler.revealed().to_vec());

    assert_eq!(first_frames, second_frames);
    assert_eq!(first, second);
    assert_eq!(first.0, 9);
    assert_eq!(&first.1[..], &source[..]);
}

#[test]
fn test_partial_replay_renders_prefix() {
    let source: PathList = vec![stroke(Point::new(0.0, 0.0), 5, InkColor::default())].into();
    let t0 = Instant::now();
    let mut scheduler = ReplayScheduler::new(DELAY);
    scheduler.set_source(Some(source), t0);

    // Three points revealed: two segments
    scheduler.advance(t0 + DELAY * 3);
    assert_eq!(render(scheduler.revealed()).segment_count(), 2);

    scheduler.skip_to_end();
    assert_eq!(render(scheduler.revealed()).segment_count(), 4);
}
