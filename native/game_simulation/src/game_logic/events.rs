//! Path: native/game_simulation/src/game_logic/events.rs
//! Summary: ステップ中に積んだ副作用を協調者へ送る（失敗はログして続行）

use crate::collaborators::{Collaborators, SideEffect};
use crate::world::GameWorld;

/// 副作用を順に送り、失敗した件数を返す
pub(crate) fn flush_outbox(w: &mut GameWorld, collab: &mut dyn Collaborators) -> usize {
    let mut failed = 0;
    for effect in w.outbox.drain(..) {
        let result = match &effect {
            SideEffect::Cue(cue) => collab.play_cue(*cue),
            SideEffect::QuestProgress { quest_id, delta } => collab.add_quest_progress(quest_id, *delta),
            SideEffect::WorldFlag { flag, value } => collab.set_world_flag(flag, *value),
            SideEffect::GrantXp(amount) => collab.grant_xp(*amount),
        };
        if let Err(e) = result {
            failed += 1;
            log::warn!("side effect {:?} dropped at frame {}: {}", effect, w.frame_id, e);
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{AudioCue, RecordingCollaborators};
    use crate::content::ContentPack;

    #[test]
    fn failures_do_not_stop_remaining_effects() {
        let mut w = GameWorld::new(ContentPack::default());
        w.outbox.push(SideEffect::Cue(AudioCue::Hit));
        w.outbox.push(SideEffect::QuestProgress { quest_id: "ghost".into(), delta: 1 });
        w.outbox.push(SideEffect::GrantXp(7));
        let mut collab = RecordingCollaborators {
            known_quests: vec!["real".into()],
            audio_offline: true,
            ..RecordingCollaborators::default()
        };
        let failed = flush_outbox(&mut w, &mut collab);
        assert_eq!(failed, 2);
        assert_eq!(collab.xp_total(), 7);
        assert!(w.outbox.is_empty());
    }
}
