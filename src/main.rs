//! Spritegraph headless demo
//!
//! Spawns a swarm of bouncing sprites plus a camera-followed player and
//! drives them with a fixed-step loop, logging a summary at the end.
//!
//! Usage: `spritegraph [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use spritegraph::cache::FrameOffset;
    use spritegraph::consts::{MAX_SUBSTEPS, SIM_DT_MS};
    use spritegraph::sim::{GroupId, SpriteId, intersect_rectangle};
    use spritegraph::{Element, EngineError, Game, Presenter, Settings, States, Transform};

    const SWARM_SIZE: usize = 24;
    const DEMO_SECONDS: f64 = 10.0;
    /// Longest frame fed to the accumulator, in milliseconds
    const MAX_FRAME_MS: f64 = 100.0;
    const PLAYER_FRAMES: usize = 4;

    /// Presenter that only counts what it is asked to do
    #[derive(Debug, Default)]
    pub struct CountingPresenter {
        pub live: usize,
        pub applied: u64,
        pub scroll: (f32, f32),
    }

    impl Presenter for CountingPresenter {
        fn configure_viewport(&mut self, width: f32, height: f32, background: Option<&str>) {
            log::info!(
                "Viewport {}x{}, background {}",
                width,
                height,
                background.unwrap_or("transparent")
            );
        }

        fn create_element(&mut self, id: SpriteId, element: &Element) {
            self.live += 1;
            log::debug!("create {} {}x{}", id, element.width, element.height);
        }

        fn resize_element(&mut self, id: SpriteId, width: f32, height: f32) {
            log::debug!("resize {} to {}x{}", id, width, height);
        }

        fn set_frame_offset(&mut self, id: SpriteId, offset: FrameOffset) {
            log::trace!("{} frame offset ({}, {})", id, offset.x, offset.y);
        }

        fn apply(&mut self, id: SpriteId, transform: Transform, _alpha: f32) {
            self.applied += 1;
            log::trace!("{} {}", id, transform);
        }

        fn scroll_to(&mut self, x: f32, y: f32) {
            self.scroll = (x, y);
        }

        fn release_element(&mut self, id: SpriteId) {
            self.live = self.live.saturating_sub(1);
            log::debug!("release {}", id);
        }
    }

    #[derive(Default)]
    struct Demo {
        player: Option<SpriteId>,
        swarm: Option<GroupId>,
        frames: u64,
        contacts: u64,
        caught: u32,
    }

    impl States<CountingPresenter> for Demo {
        fn create(&mut self, game: &mut Game<CountingPresenter>) -> Result<(), EngineError> {
            // World twice the viewport so the camera has room to scroll
            let (width, height) = (game.settings.width * 2.0, game.settings.height * 2.0);
            game.world.resize(width, height);

            game.cache.queue_spritesheet("player", "player.png", 32, 32, Some(PLAYER_FRAMES));
            game.cache.mark_loaded("player", 128, 32)?;

            let player = game.add_sprite(width * 0.5, height * 0.5, Some("player"), 0)?;
            {
                let sprite = game.sprite_mut(player)?;
                sprite.body.velocity = Vec2::new(180.0, 120.0);
                sprite.body.bounce = Vec2::ONE;
                sprite.body.collide_world_bounds = true;
            }
            game.world.camera.follow(player);

            let swarm = game.add_group();
            for _ in 0..SWARM_SIZE {
                let x = game.integer_in_range(32, width as i32 - 32) as f32;
                let y = game.integer_in_range(32, height as i32 - 32) as f32;
                let vx = game.integer_in_range(-200, 200) as f32;
                let vy = game.integer_in_range(-200, 200) as f32;
                let id = game.add_sprite_to_group(swarm, x, y, None, 0)?;
                game.sprite_mut(id)?.body.velocity = Vec2::new(vx, vy);
            }
            game.world.set_all(swarm, |sprite| {
                sprite.body.bounce = Vec2::splat(0.9);
                sprite.body.gravity.y = 2.0;
                sprite.body.collide_world_bounds = true;
            })?;

            self.player = Some(player);
            self.swarm = Some(swarm);
            Ok(())
        }

        fn update(&mut self, game: &mut Game<CountingPresenter>) {
            let (Some(player), Some(swarm)) = (self.player, self.swarm) else {
                return;
            };
            let Ok(player_box) = game.sprite(player).map(|s| s.aabb()) else {
                return;
            };

            let members: Vec<SpriteId> = match game.world.group(swarm) {
                Ok(group) => group.children().to_vec(),
                Err(_) => return,
            };
            for id in members {
                let Ok(sprite) = game.sprite(id) else {
                    continue;
                };
                if !sprite.body.touching.none {
                    self.contacts += 1;
                }
                if intersect_rectangle(&player_box, &sprite.aabb()) {
                    match game.kill_sprite(id) {
                        Ok(_) => self.caught += 1,
                        Err(e) => log::warn!("Could not remove {}: {}", id, e),
                    }
                }
            }

            self.frames += 1;
            if self.frames % 15 == 0 {
                let frame = (self.frames / 15) as usize % PLAYER_FRAMES;
                if let Err(e) = game.set_frame(player, frame) {
                    log::warn!("Player animation stopped: {}", e);
                }
            }
        }
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Spritegraph demo starting...");

        let settings = match std::env::args().nth(1) {
            Some(path) => match Settings::load(&path) {
                Ok(settings) => settings,
                Err(e) => {
                    log::error!("Failed to load settings from {}: {}", path, e);
                    std::process::exit(1);
                }
            },
            None => Settings::default(),
        };

        let mut game = Game::new(settings, CountingPresenter::default());
        let mut demo = Demo::default();
        if let Err(e) = game.start(&mut demo) {
            log::error!("Demo setup failed: {}", e);
            std::process::exit(1);
        }

        // Wall-clock frames with some jitter, fed through a fixed-step accumulator
        let mut jitter = Pcg32::seed_from_u64(game.settings.seed ^ 0x5eed);
        let mut accumulator = 0.0f64;
        let mut elapsed = 0.0f64;
        let mut steps = 0u64;
        while elapsed < DEMO_SECONDS * 1000.0 {
            let frame_ms = jitter.random_range(8.0..40.0f64).min(MAX_FRAME_MS);
            elapsed += frame_ms;
            accumulator += frame_ms;

            let mut substeps = 0;
            while accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
                game.update(SIM_DT_MS, &mut demo);
                accumulator -= SIM_DT_MS;
                substeps += 1;
                steps += 1;
            }
            game.render(&mut demo);
        }

        log::info!(
            "Ran {} steps over {:.1}s: {} sprites left, {} caught, {} wall contacts",
            steps,
            elapsed / 1000.0,
            game.world.sprite_count(),
            demo.caught,
            demo.contacts
        );
        log::info!(
            "Presenter: {} live elements, {} transforms applied, scroll ({}, {})",
            game.presenter.live,
            game.presenter.applied,
            game.presenter.scroll.0,
            game.presenter.scroll.1
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
