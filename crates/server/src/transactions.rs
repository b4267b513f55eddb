use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use engine::{
    CreateTransactionCmd, Transaction, TransactionSearchFilter, UpdateTransactionCmd, User,
};

use crate::{
    ServerError,
    server::ServerState,
    types::transaction::{
        BonusKind, SearchQuery, TransactionKind, TransactionNew, TransactionPatch, TransactionView,
    },
};

fn kind_to_engine(kind: TransactionKind) -> engine::TransactionKind {
    match kind {
        TransactionKind::Income => engine::TransactionKind::Income,
        TransactionKind::Expense => engine::TransactionKind::Expense,
    }
}

fn kind_from_engine(kind: engine::TransactionKind) -> TransactionKind {
    match kind {
        engine::TransactionKind::Income => TransactionKind::Income,
        engine::TransactionKind::Expense => TransactionKind::Expense,
    }
}

fn bonus_kind_to_engine(kind: BonusKind) -> engine::BonusKind {
    match kind {
        BonusKind::Income => engine::BonusKind::Income,
        BonusKind::Expense => engine::BonusKind::Expense,
        BonusKind::Empty => engine::BonusKind::Empty,
    }
}

fn bonus_kind_from_engine(kind: engine::BonusKind) -> BonusKind {
    match kind {
        engine::BonusKind::Income => BonusKind::Income,
        engine::BonusKind::Expense => BonusKind::Expense,
        engine::BonusKind::Empty => BonusKind::Empty,
    }
}

fn view(tx: Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: kind_from_engine(tx.kind),
        amount_minor: tx.amount_minor,
        bonus_minor: tx.bonus_minor,
        bonus_kind: bonus_kind_from_engine(tx.bonus_kind),
        category_id: tx.category_id,
        title: tx.title,
        description: tx.description,
        currency: tx.currency,
        occurred_at: tx.occurred_at,
        created_at: tx.created_at,
        updated_at: tx.updated_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state.engine.list_transactions(user.id).await?;
    Ok(Json(transactions.into_iter().map(view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let mut cmd = CreateTransactionCmd::new(
        user.id,
        kind_to_engine(payload.kind),
        payload.amount_minor,
        payload.category_id,
        payload.title,
    )
    .bonus(payload.bonus_minor, bonus_kind_to_engine(payload.bonus_kind));
    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }
    if let Some(currency) = payload.currency {
        cmd = cmd.currency(currency);
    }
    if let Some(occurred_at) = payload.occurred_at {
        cmd = cmd.occurred_at(occurred_at);
    }

    let transaction = state.engine.create_transaction(cmd).await?;
    Ok((StatusCode::CREATED, Json(view(transaction))))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransactionView>, ServerError> {
    let transaction = state.engine.transaction(user.id, id).await?;
    Ok(Json(view(transaction)))
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionPatch>,
) -> Result<Json<TransactionView>, ServerError> {
    let mut cmd = UpdateTransactionCmd::new(user.id, id);
    if let Some(kind) = payload.kind {
        cmd = cmd.kind(kind_to_engine(kind));
    }
    if let Some(amount_minor) = payload.amount_minor {
        cmd = cmd.amount_minor(amount_minor);
    }
    if let Some(bonus_minor) = payload.bonus_minor {
        cmd = cmd.bonus_minor(bonus_minor);
    }
    if let Some(bonus_kind) = payload.bonus_kind {
        cmd = cmd.bonus_kind(bonus_kind_to_engine(bonus_kind));
    }
    if let Some(category_id) = payload.category_id {
        cmd = cmd.category_id(category_id);
    }
    if let Some(title) = payload.title {
        cmd = cmd.title(title);
    }
    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }
    if let Some(currency) = payload.currency {
        cmd = cmd.currency(currency);
    }
    if let Some(occurred_at) = payload.occurred_at {
        cmd = cmd.occurred_at(occurred_at);
    }

    let transaction = state.engine.update_transaction(cmd).await?;
    Ok(Json(view(transaction)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transaction(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn search(
    State(state): State<ServerState>,
    Extension(user): Extension<User>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let filter = TransactionSearchFilter {
        title: query.title,
        description: query.description,
        amount_minor: query.amount_minor,
        bonus_minor: query.bonus_minor,
        date: query.date,
        category_id: query.category_id,
        kind: query.kind.map(kind_to_engine),
        bonus_kind: query.bonus_kind.map(bonus_kind_to_engine),
    };

    let transactions = state.engine.search_transactions(user.id, &filter).await?;
    Ok(Json(transactions.into_iter().map(view).collect()))
}
