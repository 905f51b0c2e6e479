//! Path: native/dungeon_sim/src/input.rs
//! Summary: 1 ティック分の入力スナップショットと外部から呼ばれるインタラクション種別

/// ホストが毎ティック渡す入力。キー状態のポーリングはホスト側の責務。
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// -1.0 / 0.0 / 1.0
    pub move_x:         f32,
    pub move_y:         f32,
    pub sprint:         bool,
    pub attack:         bool,
    pub interact_door:  bool,
    pub interact_chest: bool,
    /// スキルスロット 1〜4
    pub skill_slots:    [bool; 4],
}

impl InputSnapshot {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(move_x: f32, move_y: f32) -> Self {
        Self { move_x, move_y, ..Self::default() }
    }

    /// このスナップショットが要求するインタラクション（扉 → 宝箱 → スキルの順）
    pub fn interactions(&self) -> impl Iterator<Item = Interaction> + '_ {
        let door = self.interact_door.then_some(Interaction::OpenDoor);
        let chest = self.interact_chest.then_some(Interaction::OpenChest);
        let skills = self
            .skill_slots
            .iter()
            .enumerate()
            .filter(|&(_, &pressed)| pressed)
            .map(|(slot, _)| Interaction::UseSkill(slot));
        door.into_iter().chain(chest).chain(skills)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    OpenDoor,
    OpenChest,
    /// 保留中のスキルがあればそのスロットに装備、なければスロットのスキルを発動
    UseSkill(usize),
    /// 保留中のスキルを捨てる
    DiscardLoot,
}
