//! Root game object
//!
//! Owns the world, time, asset cache and presenter, and fixes the order of
//! one frame:
//! update = Time -> World -> Camera -> user hook,
//! render = World -> user hook.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::cache::AssetCache;
use crate::consts::UNTEXTURED_FILL;
use crate::error::EngineError;
use crate::integer_in_range;
use crate::renderer::{Element, Fill, Presenter};
use crate::settings::Settings;
use crate::sim::{Group, GroupId, Owner, Sprite, SpriteId, Time, World};

/// User hooks run at the end of each phase of a frame
pub trait States<P: Presenter> {
    /// Called once by `Game::start`
    fn create(&mut self, _game: &mut Game<P>) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called after the world and camera have updated
    fn update(&mut self, _game: &mut Game<P>) {}

    /// Called after the world has rendered
    fn render(&mut self, _game: &mut Game<P>) {}
}

impl<P: Presenter> States<P> for () {}

/// A running game
pub struct Game<P: Presenter> {
    pub settings: Settings,
    pub world: World,
    pub time: Time,
    pub cache: AssetCache,
    pub presenter: P,
    rng: Pcg32,
}

impl<P: Presenter> Game<P> {
    /// Build a game and set up the presenter's viewport from `settings`
    pub fn new(settings: Settings, mut presenter: P) -> Self {
        let size = Vec2::new(settings.width, settings.height);
        log::info!(
            "Game created: {}x{}, seed {}",
            settings.width,
            settings.height,
            settings.seed
        );
        presenter.configure_viewport(size.x, size.y, settings.effective_background());
        Self {
            world: World::new(size.x, size.y, size),
            time: Time::new(),
            cache: AssetCache::new(),
            rng: Pcg32::seed_from_u64(settings.seed),
            presenter,
            settings,
        }
    }

    /// Run the user's `create` hook
    pub fn start<S: States<P>>(&mut self, states: &mut S) -> Result<(), EngineError> {
        states.create(self)?;
        log::info!("Game started with {} sprites", self.world.sprite_count());
        Ok(())
    }

    /// Advance one frame of `delta_ms` milliseconds
    pub fn update<S: States<P>>(&mut self, delta_ms: f64, states: &mut S) {
        self.time.update(delta_ms);
        self.world.update(self.time.delta);
        self.world.update_camera(&mut self.presenter);
        states.update(self);
    }

    /// Publish the frame computed by the last update
    pub fn render<S: States<P>>(&mut self, states: &mut S) {
        self.world.render(&mut self.presenter);
        states.render(self);
    }

    /// Create a sprite directly in the world.
    ///
    /// `key` names a ready cache entry, `None` gives a flat-coloured sprite.
    /// A non-zero `frame` shifts the image to that spritesheet frame.
    pub fn add_sprite(&mut self, x: f32, y: f32, key: Option<&str>, frame: usize) -> Result<SpriteId, EngineError> {
        self.spawn(x, y, key, frame, Owner::World)
    }

    /// Create a sprite directly in `group`
    pub fn add_sprite_to_group(
        &mut self,
        group: GroupId,
        x: f32,
        y: f32,
        key: Option<&str>,
        frame: usize,
    ) -> Result<SpriteId, EngineError> {
        self.world.group(group)?;
        self.spawn(x, y, key, frame, Owner::Group(group))
    }

    fn spawn(&mut self, x: f32, y: f32, key: Option<&str>, frame: usize, owner: Owner) -> Result<SpriteId, EngineError> {
        // Resolve before issuing an id so a bad key leaves no trace
        let fill = match key {
            Some(key) => self.cache.resolve(key, frame)?,
            None => Fill::Color(UNTEXTURED_FILL.to_string()),
        };

        let (width, height) = (self.settings.sprite_width, self.settings.sprite_height);
        let id = self.world.next_sprite_id();
        let element = Element {
            width,
            height,
            fill: fill.clone(),
        };
        let mut sprite = Sprite::new(id, x, y, width, height, fill);
        sprite.owner = owner;
        sprite.key = key.map(str::to_string);
        sprite.frame = frame;
        self.world.attach_sprite(sprite, &element, &mut self.presenter)
    }

    /// Create an empty group attached to the world
    pub fn add_group(&mut self) -> GroupId {
        self.world.create_group()
    }

    pub fn sprite(&self, id: SpriteId) -> Result<&Sprite, EngineError> {
        self.world.sprite(id)
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Result<&mut Sprite, EngineError> {
        self.world.sprite_mut(id)
    }

    /// Detach a sprite and release its element
    pub fn destroy_sprite(&mut self, id: SpriteId) -> Result<Sprite, EngineError> {
        self.world.destroy_sprite(id, &mut self.presenter)
    }

    /// Mark a sprite dead and destroy it immediately
    pub fn kill_sprite(&mut self, id: SpriteId) -> Result<Sprite, EngineError> {
        self.world.kill_sprite(id, &mut self.presenter)
    }

    /// Destroy a group using the configured policy for its sprites
    pub fn destroy_group(&mut self, group: GroupId) -> Result<Group, EngineError> {
        let policy = self.settings.group_destroy_policy;
        log::info!("Destroying {} ({})", group, policy.as_str());
        self.world.destroy_group(group, policy, &mut self.presenter)
    }

    /// Show another spritesheet frame
    pub fn set_frame(&mut self, id: SpriteId, frame: usize) -> Result<(), EngineError> {
        let key = self.world.sprite(id)?.key.clone().ok_or(EngineError::NoImage(id))?;
        let offset = self.cache.frame(&key, frame)?;

        let sprite = self.world.sprite_mut(id)?;
        sprite.frame = frame;
        if let Fill::Image { offset: current, .. } = &mut sprite.fill {
            *current = Some(offset);
        }
        self.presenter.set_frame_offset(id, offset);
        Ok(())
    }

    /// Change a sprite's visual width
    pub fn set_width(&mut self, id: SpriteId, width: f32) -> Result<(), EngineError> {
        let sprite = self.world.sprite_mut(id)?;
        sprite.width = width;
        let height = sprite.height;
        self.presenter.resize_element(id, width, height);
        Ok(())
    }

    /// Change a sprite's visual height
    pub fn set_height(&mut self, id: SpriteId, height: f32) -> Result<(), EngineError> {
        let sprite = self.world.sprite_mut(id)?;
        sprite.height = height;
        let width = sprite.width;
        self.presenter.resize_element(id, width, height);
        Ok(())
    }

    /// Random integer in `[min, max]` from the game's seeded RNG
    pub fn integer_in_range(&mut self, min: i32, max: i32) -> i32 {
        integer_in_range(&mut self.rng, min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FrameOffset;
    use crate::renderer::{PresentCommand, RecordingPresenter};
    use crate::settings::GroupDestroyPolicy;
    use crate::sim::Child;

    fn game() -> Game<RecordingPresenter> {
        Game::new(Settings::default(), RecordingPresenter::new())
    }

    /// Counts hook calls and records what the world looked like at each
    #[derive(Default)]
    struct HookLog {
        created: bool,
        updates: u32,
        renders: u32,
        player: Option<SpriteId>,
        player_y_at_update: Vec<f32>,
    }

    impl States<RecordingPresenter> for HookLog {
        fn create(&mut self, game: &mut Game<RecordingPresenter>) -> Result<(), EngineError> {
            self.created = true;
            self.player = Some(game.add_sprite(100.0, 100.0, None, 0)?);
            Ok(())
        }

        fn update(&mut self, game: &mut Game<RecordingPresenter>) {
            self.updates += 1;
            if let Some(id) = self.player {
                if let Ok(sprite) = game.sprite(id) {
                    self.player_y_at_update.push(sprite.y);
                }
            }
        }

        fn render(&mut self, _game: &mut Game<RecordingPresenter>) {
            self.renders += 1;
        }
    }

    #[test]
    fn test_new_configures_viewport() {
        let game = game();
        assert_eq!(
            game.presenter.commands,
            vec![PresentCommand::Viewport {
                width: 960.0,
                height: 540.0,
                background: Some("#000000".to_string()),
            }]
        );

        let mut settings = Settings::with_size(320.0, 200.0);
        settings.transparent = true;
        let game = Game::new(settings, RecordingPresenter::new());
        assert_eq!(
            game.presenter.commands[0],
            PresentCommand::Viewport {
                width: 320.0,
                height: 200.0,
                background: None,
            }
        );
        assert_eq!(game.world.bounds(), crate::sim::Rectangle::new(0.0, 0.0, 320.0, 200.0));
    }

    #[test]
    fn test_sprite_without_key_is_a_world_child() {
        let mut game = game();
        let id = game.add_sprite(100.0, 100.0, None, 0).unwrap();
        assert_eq!(game.world.children(), &[Child::Sprite(id)]);
        let sprite = game.sprite(id).unwrap();
        assert_eq!(sprite.owner, Owner::World);
        assert_eq!(sprite.fill, Fill::Color("#00ff00".to_string()));
        assert_eq!((sprite.width, sprite.height), (32.0, 32.0));
    }

    #[test]
    fn test_add_sprite_to_group() {
        let mut game = game();
        let group = game.add_group();
        let id = game.add_sprite_to_group(group, 10.0, 10.0, None, 0).unwrap();
        assert_eq!(game.world.children(), &[Child::Group(group)]);
        assert_eq!(game.world.group(group).unwrap().children(), &[id]);

        let err = game.add_sprite_to_group(GroupId(42), 0.0, 0.0, None, 0).unwrap_err();
        assert!(matches!(err, EngineError::UnknownGroup(GroupId(42))));
    }

    #[test]
    fn test_missing_asset_is_reported_at_construction() {
        let mut game = game();
        let err = game.add_sprite(0.0, 0.0, Some("ghost"), 0).unwrap_err();
        assert!(matches!(err, EngineError::MissingAsset(_)));

        game.cache.queue_image("ghost", "ghost.png");
        let err = game.add_sprite(0.0, 0.0, Some("ghost"), 0).unwrap_err();
        assert!(matches!(err, EngineError::AssetNotReady(_)));

        assert_eq!(game.world.sprite_count(), 0);
        assert!(game.presenter.live_elements().is_empty());
        assert_eq!(game.presenter.commands.len(), 1);
    }

    #[test]
    fn test_spritesheet_frames() {
        let mut game = game();
        game.cache.queue_spritesheet("hero", "hero.png", 32, 32, None);
        game.cache.mark_loaded("hero", 64, 32).unwrap();

        let id = game.add_sprite(50.0, 50.0, Some("hero"), 1).unwrap();
        assert_eq!(
            game.presenter.commands[1],
            PresentCommand::Create {
                id,
                element: Element {
                    width: 32.0,
                    height: 32.0,
                    fill: Fill::Image {
                        src: "hero.png".to_string(),
                        offset: Some(FrameOffset { x: -32, y: 0 }),
                    },
                },
            }
        );

        game.set_frame(id, 0).unwrap();
        assert_eq!(game.sprite(id).unwrap().frame, 0);
        assert_eq!(
            game.presenter.commands.last(),
            Some(&PresentCommand::Frame {
                id,
                offset: FrameOffset { x: 0, y: 0 }
            })
        );

        assert!(matches!(game.set_frame(id, 5), Err(EngineError::MissingFrame { frame: 5, .. })));

        let plain = game.add_sprite(0.0, 0.0, None, 0).unwrap();
        assert!(matches!(game.set_frame(plain, 0), Err(EngineError::NoImage(_))));
    }

    #[test]
    fn test_set_width_and_height() {
        let mut game = game();
        let id = game.add_sprite(100.0, 100.0, None, 0).unwrap();
        game.set_width(id, 64.0).unwrap();
        game.set_height(id, 16.0).unwrap();
        let sprite = game.sprite(id).unwrap();
        assert_eq!((sprite.width, sprite.height), (64.0, 16.0));
        assert_eq!(
            game.presenter.commands.last(),
            Some(&PresentCommand::Resize {
                id,
                width: 64.0,
                height: 16.0
            })
        );
    }

    #[test]
    fn test_frame_order_and_hooks() {
        let mut game = game();
        let mut hooks = HookLog::default();
        game.start(&mut hooks).unwrap();
        assert!(hooks.created);

        let player = hooks.player.unwrap();
        game.sprite_mut(player).unwrap().body.gravity.y = 10.0;

        for _ in 0..3 {
            game.update(1000.0, &mut hooks);
            game.render(&mut hooks);
        }

        // The hook sees the world after it has moved
        assert_eq!(hooks.player_y_at_update, vec![110.0, 130.0, 160.0]);
        assert_eq!(game.sprite(player).unwrap().body.velocity.y, 30.0);
        assert_eq!((hooks.updates, hooks.renders), (3, 3));
        assert_eq!(game.time.delta, 1.0);
    }

    #[test]
    fn test_camera_moves_after_world() {
        let settings = Settings::with_size(400.0, 300.0);
        let mut game = Game::new(settings, RecordingPresenter::new());
        game.world.resize(2000.0, 300.0);
        let id = game.add_sprite(320.0, 100.0, None, 0).unwrap();
        game.sprite_mut(id).unwrap().body.velocity.x = 100.0;
        game.world.camera.follow(id);

        game.update(1000.0, &mut ());
        // Sprite moved to 420 first, then the camera snapped to it
        assert_eq!(game.world.camera.x, 220.0);
        assert_eq!(game.presenter.last_scroll(), Some((-220.0, -0.0)));
        // Visibility used the camera as it was at the start of the frame
        assert!(!game.sprite(id).unwrap().in_camera);
    }

    #[test]
    fn test_kill_and_destroy() {
        let mut game = game();
        let a = game.add_sprite(10.0, 10.0, None, 0).unwrap();
        let b = game.add_sprite(20.0, 20.0, None, 0).unwrap();

        let killed = game.kill_sprite(a).unwrap();
        assert!(!killed.alive);
        game.destroy_sprite(b).unwrap();
        assert!(matches!(game.destroy_sprite(b), Err(EngineError::Detached(_))));
        assert!(game.world.children().is_empty());
        assert!(game.presenter.live_elements().is_empty());
    }

    #[test]
    fn test_destroy_group_uses_configured_policy() {
        let mut settings = Settings::default();
        settings.group_destroy_policy = GroupDestroyPolicy::Cascade;
        let mut game = Game::new(settings, RecordingPresenter::new());
        let group = game.add_group();
        game.add_sprite_to_group(group, 10.0, 10.0, None, 0).unwrap();

        game.destroy_group(group).unwrap();
        assert_eq!(game.world.sprite_count(), 0);
        assert!(game.world.children().is_empty());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = game();
        let mut b = game();
        let rolls_a: Vec<i32> = (0..16).map(|_| a.integer_in_range(1, 6)).collect();
        let rolls_b: Vec<i32> = (0..16).map(|_| b.integer_in_range(1, 6)).collect();
        assert_eq!(rolls_a, rolls_b);
        assert!(rolls_a.iter().all(|n| (1..=6).contains(n)));
    }
}
