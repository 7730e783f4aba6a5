use uuid::Uuid;

use super::{RequestContext, Resolver};
use crate::error::Result;
use crate::service::loader::{ActivityDetails, Loader, expand_activities};
use crate::service::{Page, activity};
use crate::types::{ActivityFilter, Permission, SearchFilter, UserActivity};

impl Resolver {
    pub fn user_activities(
        &self,
        ctx: &RequestContext,
        org_uid: Option<Uuid>,
        search: &SearchFilter,
        filter: &ActivityFilter,
    ) -> Result<Page<ActivityDetails>> {
        let auther = self.authorize(ctx, Permission::ReadUserActivity)?;
        let scope = Self::scope(&auther, org_uid.or(ctx.organization))?;
        self.read(|conn| {
            let page = activity::list(conn, search, filter, scope)?;
            let mut loader = Loader::new(conn);
            Ok(Page {
                items: expand_activities(&mut loader, page.items)?,
                total: page.total,
            })
        })
    }

    pub fn user_activity(&self, ctx: &RequestContext, id: i64) -> Result<UserActivity> {
        let auther = self.authorize(ctx, Permission::ReadUserActivity)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.read(|conn| activity::get_by_id(conn, id, scope))
    }
}
