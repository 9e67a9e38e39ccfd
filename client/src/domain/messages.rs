//! User-facing copy shown in notices and inline form errors.
//!
//! LocalPay ships a Russian interface; keep every visible string here so
//! screens stay free of literals.

pub const INVALID_LOGIN: &str = "Неверный логин или пароль";
pub const UNKNOWN_ROLE: &str = "Неизвестная роль пользователя";
pub const SESSION_EXPIRED: &str = "Ошибка авторизации. Попробуйте войти снова.";
pub const ACCESS_DENIED: &str = "Недостаточно прав для этого действия";

pub const PAYMENTS_LOAD_FAILED: &str = "Ошибка при загрузке платежей";
pub const PAYMENT_UPDATED: &str = "Платеж успешно обновлен";
pub const PAYMENT_CREATED: &str = "Платеж успешно создан";
pub const PAYMENT_SAVE_FAILED: &str = "Ошибка при сохранении платежа";
pub const PAYMENT_DONE: &str = "Платеж успешно выполнен!";
pub const PAYMENT_FAILED: &str = "Ошибка при выполнении платежа";
pub const NOT_ENOUGH_MONEY: &str = "Недостаточно средств на балансе";

pub const USERS_LOAD_FAILED: &str = "Ошибка при загрузке пользователей";
pub const INVALID_BALANCE_RANGE: &str = "Некорректный диапазон баланса";
pub const USER_UPDATED: &str = "Пользователь успешно обновлен";
pub const USER_UPDATE_FAILED: &str = "Ошибка при обновлении пользователя";
pub const BALANCE_REFILLED: &str = "Баланс пополнен";
pub const BALANCE_WRITTEN_OFF: &str = "Средства списаны";
pub const WRITE_OFF_EXCEEDS_SPENT: &str = "Списание не может быть больше потраченного";
pub const USER_CREATED: &str = "Пользователь успешно создан";
pub const USER_CREATE_FAILED: &str = "Ошибка при создании пользователя";
pub const PASSWORDS_DIFFER: &str = "Пароли не совпадают";
pub const PROFILE_LOAD_FAILED: &str = "Ошибка при загрузке профиля";

pub const FUTURE_END_DATE: &str = "Нельзя выбирать дату в будущем. Максимум - завтра.";
pub const INVALID_DATE: &str = "Некорректная дата";
pub const DATE_RANGE_REVERSED: &str = "Дата начала позже даты окончания";
pub const REPORT_SAVED: &str = "Отчет сохранен";
pub const REPORT_FAILED: &str = "Ошибка при загрузке отчета";

pub const REQUIRED_CREDENTIALS: &str = "Введите логин и пароль";
pub const SERVICE_UNAVAILABLE: &str = "Сервер недоступен. Попробуйте позже.";
pub const SESSION_STORAGE_FAILED: &str = "Не удалось сохранить сессию";
pub const REQUIRED_FIELDS: &str = "Заполните все обязательные поля";
pub const INVALID_PAYMENT: &str = "Укажите лицевой счет и сумму больше нуля";
pub const INVALID_AMOUNT: &str = "Сумма должна быть больше нуля";
pub const REPORT_LOGIN_REQUIRED: &str = "Укажите логин пользователя";
