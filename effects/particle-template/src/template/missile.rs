//! Homing missile with an optional trail emitter
//!
//! A missile template creates its main particle eagerly when it is built, so
//! the travel time to the target is fixed at that moment. The first
//! generation call hands the main particle out; every later call emits one
//! trail particle re-framed onto the main particle's live position and
//! heading.

use super::KinematicModel;
use super::graviting::GravitingTemplate;
use super::spraying::SprayingTemplate;
use crate::config::{SubTemplateConfig, TemplateConfig, TemplateKind};
use crate::error::Result;
use crate::host::{GenerationContext, Host, TextureId};
use crate::input::Keyframe;
use crate::particle::{GeneratedParticle, Motion, ParticleHandle};
use crate::vector::Vector3;
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Template kinds that can trail behind a missile
#[derive(Debug, Clone)]
pub enum SubEmitter {
    /// Exhaust sprayed backwards from the missile
    Spraying(SprayingTemplate),
    /// Particles orbiting the missile
    Graviting(GravitingTemplate),
}

impl SubEmitter {
    /// Build a trail template emitting from `main`
    ///
    /// Kinds other than Spraying and Graviting cannot trail and yield `None`.
    pub fn build(
        sub: &SubTemplateConfig,
        default_texture: &TextureId,
        host: &dyn Host,
        main: &ParticleHandle,
    ) -> Result<Option<Self>> {
        let mut emitter = match sub.kind {
            TemplateKind::Spraying => {
                SubEmitter::Spraying(SprayingTemplate::build(&sub.config, default_texture, host)?)
            }
            TemplateKind::Graviting => {
                SubEmitter::Graviting(GravitingTemplate::build(&sub.config, default_texture, host)?)
            }
            TemplateKind::Missile | TemplateKind::Area => {
                warn!("{} templates cannot trail a missile, trail disabled", sub.kind);
                return Ok(None);
            }
        };

        let common = match &mut emitter {
            SubEmitter::Spraying(template) => template.common_mut(),
            SubEmitter::Graviting(template) => template.common_mut(),
        };
        common.attach_to(main);
        Ok(Some(emitter))
    }

    /// Emit one trail particle behind a missile at `origin` heading `heading` degrees
    fn emit(
        &self,
        ctx: &mut GenerationContext<'_>,
        origin: Vector3,
        heading: f64,
    ) -> Result<GeneratedParticle> {
        match self {
            SubEmitter::Spraying(template) => {
                let mut particle = template.generate_initial_state(ctx)?;

                // Local x points backwards along the missile heading
                let radians = heading.to_radians();
                let x_axis = Vector3::new(-radians.cos(), -radians.sin(), 0.0);
                let y_axis = Vector3::new(-radians.sin(), radians.cos(), 0.0);
                let offset = particle.position() - origin;
                let position = origin + x_axis * offset.x + y_axis * offset.y;
                particle.renderable.set_position(position.x, position.y);

                particle.turn(heading + 180.0);
                Ok(particle)
            }
            SubEmitter::Graviting(template) => {
                let mut particle = template.generate_initial_state(ctx)?;
                particle.turn(heading + 180.0);
                Ok(particle)
            }
        }
    }
}

/// Emission state of a missile
#[derive(Debug)]
pub enum MissileState {
    /// Main particle built but not handed out yet
    Uninitialized {
        /// The main particle
        main: ParticleHandle,
    },
    /// Main particle handed out, trail particles follow it
    Emitting {
        /// The main particle, alive while the caller holds it
        main: Weak<RefCell<GeneratedParticle>>,
    },
}

/// One homing particle followed by an optional trail
#[derive(Debug)]
pub struct MissileTemplate {
    state: MissileState,
    sub: Option<SubEmitter>,
}

impl MissileTemplate {
    /// Build the template and its main particle
    ///
    /// The main particle uses spraying rules and is then locked onto the
    /// target: both angle keyframes become the exact bearing and its lifetime
    /// is set so it arrives at the target.
    pub fn build(
        config: &TemplateConfig,
        default_texture: &TextureId,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Self> {
        let spraying = SprayingTemplate::build(config, default_texture, ctx.host)?;
        let mut main = spraying.generate_initial_state(ctx)?;
        lock_on_target(&mut main, ctx.host);

        let main = Rc::new(RefCell::new(main));
        let sub = match config.sub_particle_template.as_deref() {
            Some(sub) => SubEmitter::build(sub, default_texture, ctx.host, &main)?,
            None => None,
        };

        Ok(Self {
            state: MissileState::Uninitialized { main },
            sub,
        })
    }

    /// Current emission state
    pub fn state(&self) -> &MissileState {
        &self.state
    }

    /// Trail template, if any
    pub fn sub_emitter(&self) -> Option<&SubEmitter> {
        self.sub.as_ref()
    }

    /// Hand out the main particle once, then emit trail particles
    pub fn generate_particles(
        &mut self,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Option<ParticleHandle>> {
        let main = match self.transition() {
            Transition::Started(main) => return Ok(Some(main)),
            Transition::Running(main) => main,
        };

        let Some(sub) = &self.sub else {
            return Ok(None);
        };
        let Some(main) = main.upgrade() else {
            debug!("Missile main particle released, trail stopped");
            return Ok(None);
        };

        let (origin, heading) = {
            let main = main.borrow();
            (main.position(), main.direction())
        };
        let particle = sub.emit(ctx, origin, heading)?;
        Ok(Some(Rc::new(RefCell::new(particle))))
    }

    fn transition(&mut self) -> Transition {
        match &self.state {
            MissileState::Uninitialized { main } => {
                let main = Rc::clone(main);
                self.state = MissileState::Emitting {
                    main: Rc::downgrade(&main),
                };
                Transition::Started(main)
            }
            MissileState::Emitting { main } => Transition::Running(main.clone()),
        }
    }
}

enum Transition {
    Started(ParticleHandle),
    Running(Weak<RefCell<GeneratedParticle>>),
}

/// Aim the main particle at its target and time its arrival
fn lock_on_target(particle: &mut GeneratedParticle, host: &dyn Host) {
    let spawn = particle.position();
    let Motion::Spraying {
        velocity,
        angle,
        target,
        heading_degrees,
    } = &mut particle.motion
    else {
        return;
    };
    let Some(target) = target.as_ref().and_then(|target| target.anchor(host)) else {
        return;
    };
    let target = target.position();
    if spawn.same_xy(&target) {
        return;
    }

    let bearing = spawn.bearing_to(&target).to_degrees();
    *angle = Keyframe::fixed(bearing);
    *heading_degrees = bearing;

    let distance = spawn.distance_2d(&target);
    let average_velocity = match velocity.end {
        Some(end) => (velocity.start.value() + end.value()) / 2.0,
        None => velocity.start.value(),
    };
    if average_velocity == 0.0 {
        debug!("Missile has no velocity, keeping sampled lifetime");
        return;
    }
    particle.lifetime_ms = 1000.0 * distance / average_velocity;
}
