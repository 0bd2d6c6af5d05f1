//! Slingshot systems (hold edges → slots → pairing → impulses)

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, RigidBody};

use crate::components::{AimRig, Player, PlayerActions};
use crate::targeting::{is_launchable, AimConfig, AimCone, MostLikelyTarget, TargetScan};

use super::components::{launch_direction, CaptureReleaseCoordinator, HoldChannel, SlingshotConfig};
use super::events::{LaunchEvent, TargetCaptured, TargetReleased};

/// Система: press/release edges обоих каналов → CaptureReleaseCoordinator
///
/// Каналы обрабатываются в фиксированном порядке (0, затем 1); внутри канала
/// press раньше release. Если кандидат канала 1 только что захвачен каналом 0,
/// acquisition пересчитывается с исключением удерживаемых целей.
pub fn handle_hold_input(
    time: Res<Time<Fixed>>,
    scan: TargetScan,
    mut players: Query<
        (
            Entity,
            &Transform,
            &AimRig,
            &AimConfig,
            &PlayerActions,
            &mut MostLikelyTarget,
            &mut CaptureReleaseCoordinator,
        ),
        With<Player>,
    >,
    mut captured_events: EventWriter<TargetCaptured>,
    mut released_events: EventWriter<TargetReleased>,
) {
    let now = time.elapsed_secs();

    for (shooter, transform, rig, config, actions, mut most_likely, mut coordinator) in players.iter_mut() {
        for channel in HoldChannel::ALL {
            let button = actions.hold[channel.index()];

            if button.just_pressed {
                let mut candidate = most_likely.0;

                if let Some(target) = candidate {
                    if coordinator.holder_of(target).is_some() {
                        let cone = AimCone::from_rig(transform, rig, config);
                        let held: Vec<Entity> = coordinator.held_targets().collect();
                        candidate = scan.most_likely(shooter, &cone, &held);
                        most_likely.0 = candidate;
                    }
                }

                match coordinator.press(channel, candidate, now) {
                    Ok(target) => {
                        crate::log(&format!(
                            "Slingshot: {:?} captured {:?} on {:?} at {:.3}s",
                            shooter, target, channel, now
                        ));
                        captured_events.write(TargetCaptured {
                            shooter,
                            channel,
                            target,
                            at: now,
                        });
                    }
                    Err(error) => crate::log(&format!("Slingshot: {:?} press rejected: {}", shooter, error)),
                }
            }

            if button.just_released {
                match coordinator.release(channel, now) {
                    Ok(record) => {
                        crate::log(&format!(
                            "Slingshot: {:?} released {:?} on {:?} at {:.3}s",
                            shooter, record.target, channel, now
                        ));
                        released_events.write(TargetReleased {
                            shooter,
                            channel,
                            target: record.target,
                            at: now,
                        });
                    }
                    Err(error) => crate::log(&format!("Slingshot: {:?} release ignored: {}", shooter, error)),
                }
            }
        }
    }
}

/// Система: pending releases → LaunchEvent (если в sync window)
///
/// Направление считается по позициям целей на момент pairing. Цель без
/// Transform (despawned) даёт нулевое направление: records всё равно consumed.
pub fn pair_releases(
    mut coordinators: Query<(Entity, &SlingshotConfig, &mut CaptureReleaseCoordinator)>,
    positions: Query<&Transform>,
    mut launch_events: EventWriter<LaunchEvent>,
) {
    for (shooter, config, mut coordinator) in coordinators.iter_mut() {
        let Some((first, second)) = coordinator.try_pair(config.sync_window) else {
            continue;
        };

        let direction = match (positions.get(first.target), positions.get(second.target)) {
            (Ok(a), Ok(b)) => launch_direction(a.translation, b.translation),
            _ => Vec3::ZERO,
        };

        crate::log_info(&format!(
            "Slingshot: LAUNCH {:?} ↔ {:?} (releases {:.3}s / {:.3}s, dir {:?})",
            first.target, second.target, first.released_at, second.released_at, direction
        ));

        launch_events.write(LaunchEvent {
            shooter,
            first: first.target,
            second: second.target,
            direction,
            impulse: config.launch_impulse,
        });
    }
}

/// Система: LaunchEvent → ExternalImpulse на dynamic целях
///
/// Static/kinematic цели (или без ExternalImpulse): no-op.
pub fn apply_launch_impulses(
    mut launch_events: EventReader<LaunchEvent>,
    mut bodies: Query<(Option<&RigidBody>, Option<&mut ExternalImpulse>)>,
) {
    for event in launch_events.read() {
        if event.direction == Vec3::ZERO {
            crate::log(&format!("Slingshot: degenerate launch axis for {:?}, no impulse", event.targets()));
            continue;
        }

        for target in event.targets() {
            let Ok((body, impulse)) = bodies.get_mut(target) else {
                continue;
            };

            match impulse {
                Some(mut impulse) if is_launchable(body) => {
                    impulse.impulse += event.impulse_for(target);
                }
                _ => crate::log(&format!("Slingshot: {:?} is not launchable, impulse skipped", target)),
            }
        }
    }
}
