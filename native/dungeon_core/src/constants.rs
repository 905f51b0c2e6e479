//! Path: native/dungeon_core/src/constants.rs
//! Summary: タイルサイズ・ティック長・プレイヤー/敵/ボスの調整値などの定数定義

// Tile grid
pub const TILE_SIZE:        f32 = 32.0;
pub const WORLD_TILES_W:    usize = 100;
pub const WORLD_TILES_H:    usize = 80;

// Fixed timestep（1 ティック = 1/60 秒）
pub const TICK_DT:          f32 = 1.0 / 60.0;
pub const FRAME_BUDGET_MS:  f64 = 1000.0 / 60.0;

/// 寿命判定の浮動小数誤差吸収用
pub const TIME_EPSILON:     f64 = 1e-6;

// Player
pub const PLAYER_SIZE:            f32 = 27.0;
pub const PLAYER_START_X:         f32 = 320.0;
pub const PLAYER_START_Y:         f32 = 320.0;
pub const PLAYER_MAX_HP:          f32 = 400.0;
pub const PLAYER_MAX_STAMINA:     f32 = 100.0;
pub const PLAYER_SPEED:           f32 = 180.0;
pub const PLAYER_SPRINT_FACTOR:   f32 = 1.4;
pub const STAMINA_DRAIN_PER_SEC:  f32 = 40.0;
pub const STAMINA_REGEN_PER_SEC:  f32 = 20.0;
pub const PLAYER_ATTACK_DAMAGE:   f32 = 25.0;
pub const PLAYER_ATTACK_RANGE:    f32 = 50.0;
pub const PLAYER_ATTACK_COOLDOWN: f64 = 0.5;
pub const PLAYER_INVINCIBLE_SECS: f64 = 1.0;

// Player projectile（弓）
pub const ARROW_SPEED:      f32 = 320.0;
pub const ARROW_LIFETIME:   f64 = 2.0;
pub const ARROW_BASE_RANGE: f32 = 250.0;

// Dash
pub const DASH_DISTANCE:    f32 = 100.0;
pub const DASH_COST:        f32 = 30.0;
pub const DASH_COOLDOWN:    f64 = 1.0;
pub const DASH_STEP:        f32 = 4.0;

// Enemy
pub const ENEMY_SIZE:             f32 = 24.0;
pub const ENEMY_SPEED:            f32 = 180.0;
pub const ENEMY_PATROL_FACTOR:    f32 = 0.5;
pub const ENEMY_MELEE_DAMAGE:     f32 = 12.0;
pub const ENEMY_MELEE_RANGE:      f32 = 40.0;
pub const ENEMY_ATTACK_COOLDOWN:  f64 = 1.5;
pub const ENEMY_CHASE_RADIUS:     f32 = 200.0;
pub const ENEMY_SHOOT_RANGE:      f32 = 150.0;
pub const ENEMY_SHOOT_COOLDOWN:   f64 = 2.0;
pub const ENEMY_DETECTION_RADIUS: f32 = 100.0;
pub const PATROL_MIN_DISTANCE:    u32 = 60;
pub const PATROL_MAX_DISTANCE:    u32 = 120;

// Homing blend（80% 維持 / 20% 再照準）
pub const HOMING_RETAIN: f32 = 0.8;

// Boss
pub const BOSS_SIZE:               f32 = 64.0;
pub const BOSS_DAMAGE_IMMUNITY:    f64 = 0.3;
pub const BOSS_ENRAGE_RATIO:       f32 = 0.5;
pub const BOSS_RETARGET_INTERVAL:  f64 = 4.0;
pub const BOSS_ARRIVE_DISTANCE:    f32 = 5.0;
pub const BOSS_DRIFT_MIN_DISTANCE: f32 = 10.0;
pub const TELEPORT_ATTEMPTS:       u32 = 20;
pub const TELEPORT_MIN_DISTANCE:   u32 = 80;
pub const TELEPORT_MAX_DISTANCE:   u32 = 120;
pub const TELEPORT_FADE_START:     u8 = 100;
pub const TELEPORT_FADE_STEP:      u8 = 5;

// Progression / interaction
pub const DOOR_INTERACT_DISTANCE:  f32 = 80.0;
pub const CHEST_INTERACT_DISTANCE: f32 = 60.0;
pub const CHEST_SIZE:              f32 = 32.0;
pub const HEALTH_POTION_HEAL:      f32 = 150.0;

// Visual windows（描画用の状態タグ判定）
pub const HURT_FLASH_SECS:   f64 = 0.2;
pub const ATTACK_FLASH_SECS: f64 = 0.2;
pub const ENEMY_HEALTH_BAR_SECS: f64 = 5.0; // 被弾後に HP バーを出す時間
